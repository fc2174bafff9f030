//! Bounded-wait subprocess execution for the `shell` template function.
//!
//! The program is run directly (no shell interpretation) with standard input
//! closed. Its standard output and standard error go to anonymous temporary files
//! rather than pipes, so a chatty child can never block on a full pipe while we
//! wait for it.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::process::{Command, Stdio};
use std::time::Duration;

use wait_timeout::ChildExt;

use super::error::FunctionError;

/// Run `command` with `args` and return its standard output.
///
/// # Errors
///
/// - [`FunctionError::ShellSpawn`] when the program cannot be started or waited on
/// - [`FunctionError::ShellTimedOut`] when it runs longer than `timeout`; the child
///   is killed first
/// - [`FunctionError::ShellFailed`] on a non-zero exit or termination by signal,
///   carrying the captured standard error
pub fn run_command(
    command: &str,
    args: &[String],
    timeout: Duration,
) -> Result<String, FunctionError> {
    let spawn_error = |source: std::io::Error| FunctionError::ShellSpawn {
        command: command.to_string(),
        source,
    };

    let stdout_file = tempfile::tempfile().map_err(spawn_error)?;
    let stderr_file = tempfile::tempfile().map_err(spawn_error)?;

    tracing::debug!("shell: running '{}' with {} argument(s)", command, args.len());

    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_file.try_clone().map_err(spawn_error)?))
        .stderr(Stdio::from(stderr_file.try_clone().map_err(spawn_error)?))
        .spawn()
        .map_err(spawn_error)?;

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            tracing::warn!("shell: '{}' exceeded {:?}, killing it", command, timeout);
            if let Err(e) = child.kill() {
                tracing::debug!("shell: kill failed: {}", e);
            }
            let _ = child.wait();
            return Err(FunctionError::ShellTimedOut {
                command: command.to_string(),
                timeout,
                stderr: read_captured(stderr_file),
            });
        }
        Err(e) => {
            let _ = child.kill();
            return Err(spawn_error(e));
        }
    };

    if !status.success() {
        return Err(FunctionError::ShellFailed {
            command: command.to_string(),
            code: status.code(),
            stderr: read_captured(stderr_file),
        });
    }

    let stdout = read_captured(stdout_file);
    tracing::trace!("shell: '{}' produced {} byte(s)", command, stdout.len());
    Ok(stdout)
}

// The child wrote through a duplicate of this handle, which shares its offset.
fn read_captured(mut file: File) -> String {
    let mut bytes = Vec::new();
    if let Err(e) = file.seek(SeekFrom::Start(0)).and_then(|_| file.read_to_end(&mut bytes)) {
        tracing::debug!("shell: failed to read captured output: {}", e);
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

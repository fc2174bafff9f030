//! Error types raised while rendering templates.
//!
//! Two families live here:
//! - [`FunctionError`]: failures of the template functions themselves. The privileged
//!   variants are fatal for the whole run; they travel up through Tera's error chain
//!   and are recognised at the top-level boundary by
//!   [`fatal_exit`](crate::core::error::fatal_exit).
//! - [`TemplateError`]: a Tera render failure enriched with suggestions for the user.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure raised by a template function.
#[derive(Debug, Error)]
pub enum FunctionError {
    /// A privileged function was called without `--trusted`.
    #[error("{function} called, but '--trusted' mode not enabled")]
    TrustViolation {
        /// Name of the offending function as seen by templates
        function: &'static str,
    },

    /// The `shell` function could not start the child process.
    #[error("shell failed to run command '{command}': {source}")]
    ShellSpawn {
        /// Program that failed to start
        command: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The child process of the `shell` function exited unsuccessfully.
    #[error("shell '{command}' {}", describe_exit(.code))]
    ShellFailed {
        /// Program that was executed
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard error of the child
        stderr: String,
    },

    /// The child process of the `shell` function exceeded its bounded wait.
    #[error("shell '{command}' did not finish within {timeout:?} and was killed")]
    ShellTimedOut {
        /// Program that was executed
        command: String,
        /// The wait that elapsed
        timeout: Duration,
        /// Standard error captured before the child was killed
        stderr: String,
    },

    /// `from_file` could not read its target.
    #[error("from_file failed to read file '{}': {source}", .path.display())]
    FileRead {
        /// Resolved path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A function was called with missing or mistyped arguments.
    #[error("{function}: {message}")]
    InvalidArgument {
        /// Function name
        function: &'static str,
        /// What was wrong with the arguments
        message: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code: {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl FunctionError {
    /// Whether this failure must terminate the run instead of surfacing as a
    /// normal render error.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::TrustViolation { .. }
                | Self::ShellSpawn { .. }
                | Self::ShellFailed { .. }
                | Self::ShellTimedOut { .. }
        )
    }

    /// Process exit code used when this failure terminates the run.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ShellFailed {
                code: Some(code),
                ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Standard error captured from a child process, if any.
    #[must_use]
    pub fn captured_stderr(&self) -> Option<&str> {
        match self {
            Self::ShellFailed {
                stderr,
                ..
            }
            | Self::ShellTimedOut {
                stderr,
                ..
            } => Some(stderr.as_str()),
            _ => None,
        }
    }
}

/// A Tera render failure with user-facing context.
///
/// The original [`tera::Error`] is kept as the source so that function failures
/// buried in its chain stay reachable.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template referenced a variable the context does not hold.
    #[error("template '{template}': variable `{variable}` not found{}", format_suggestions(.suggestions))]
    VariableNotFound {
        /// Template being rendered
        template: String,
        /// Variable path as reported by Tera
        variable: String,
        /// Closest context keys
        suggestions: Vec<String>,
        /// Underlying engine error
        #[source]
        source: tera::Error,
    },

    /// The selection target is not in the registry.
    #[error("template '{name}' not found{}", format_suggestions(.suggestions))]
    TemplateNotFound {
        /// Requested name
        name: String,
        /// Closest loaded names
        suggestions: Vec<String>,
        /// Underlying engine error
        #[source]
        source: tera::Error,
    },

    /// Any other render failure.
    #[error("template '{template}': {message}")]
    Render {
        /// Template being rendered
        template: String,
        /// Flattened engine error chain
        message: String,
        /// Underlying engine error
        #[source]
        source: tera::Error,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Flatten a Tera error chain into one readable line.
///
/// Tera nests the interesting cause several levels down ("Failed to render 'x'"
/// → "Function call 'shell' failed" → actual reason); every distinct level is kept.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages: Vec<String> = Vec::new();
    let mut current: Option<&dyn Error> = Some(error);
    while let Some(err) = current {
        let msg = err.to_string().trim().to_string();
        if !msg.is_empty() && !messages.contains(&msg) {
            messages.push(msg);
        }
        current = err.source();
    }

    if messages.is_empty() {
        "template rendering failed".to_string()
    } else {
        messages.join("\n  → ")
    }
}

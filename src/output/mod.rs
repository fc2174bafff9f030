//! Output targets and preamble preservation.
//!
//! The rendered document reaches its target in one step:
//! - standard output gets a single `write_all` followed by a flush;
//! - a file is written to a temporary file in the destination directory and then
//!   renamed over the destination, so a failed run leaves the previous contents
//!   (or the absence of a file) untouched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::constants::PREAMBLE_COMMENT_MARKERS;
use crate::core::TplError;

/// Where the rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// The run's output writer (standard output for the binary)
    Stdout,
    /// A destination file
    File(PathBuf),
}

impl OutputTarget {
    /// Target for an optional `--output-file` value.
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Whether output goes to the output writer rather than a file.
    #[must_use]
    pub const fn is_stdout(&self) -> bool {
        matches!(self, Self::Stdout)
    }

    /// Write `document` to this target; `out` is used for [`OutputTarget::Stdout`].
    ///
    /// # Errors
    ///
    /// [`TplError::OutputWrite`] naming the target when any step fails.
    pub fn write(&self, document: &str, out: &mut dyn Write) -> Result<(), TplError> {
        match self {
            Self::Stdout => {
                out.write_all(document.as_bytes()).and_then(|()| out.flush()).map_err(|e| {
                    TplError::OutputWrite {
                        target: "stdout".to_string(),
                        reason: e.to_string(),
                    }
                })
            }
            Self::File(path) => write_file_atomically(path, document.as_bytes()),
        }
    }
}

/// Replace `path` with `content` through a temporary file in the same directory.
///
/// Parent directories are created. An existing destination keeps its permissions.
///
/// # Errors
///
/// [`TplError::OutputWrite`] naming `path`; the destination is unchanged.
pub fn write_file_atomically(path: &Path, content: &[u8]) -> Result<(), TplError> {
    let write_error = |reason: String| TplError::OutputWrite {
        target: path.display().to_string(),
        reason,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| write_error(e.to_string()))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| write_error(e.to_string()))?;
    temp.write_all(content).map_err(|e| write_error(e.to_string()))?;
    temp.as_file().sync_all().map_err(|e| write_error(e.to_string()))?;

    let permissions = match fs::metadata(path) {
        Ok(existing) => Some(existing.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(permissions) = permissions {
        temp.as_file().set_permissions(permissions).map_err(|e| write_error(e.to_string()))?;
    }

    temp.persist(path).map_err(|e| write_error(e.error.to_string()))?;
    tracing::debug!("wrote {} byte(s) to {}", content.len(), path.display());
    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Leading comment block of the file at `path`.
///
/// Lines are taken while their first non-blank characters are a comment marker
/// (`#`, `//`, `--` or `;`), each with its line ending. A missing or unreadable
/// file has an empty preamble.
#[must_use]
pub fn extract_preamble(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(existing) => leading_comments(&existing).to_string(),
        Err(e) => {
            tracing::debug!("no preamble from {}: {}", path.display(), e);
            String::new()
        }
    }
}

fn leading_comments(text: &str) -> &str {
    let mut end = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if !PREAMBLE_COMMENT_MARKERS.iter().any(|marker| trimmed.starts_with(marker)) {
            break;
        }
        end += line.len();
    }
    &text[..end]
}

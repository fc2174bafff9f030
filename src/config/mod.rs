//! Run-scoped configuration.
//!
//! `tpl` has no configuration files: everything comes from the command line (and
//! `TPL_SHELL_TIMEOUT`). The settings that reach deep into rendering are gathered
//! once into a [`RenderConfig`] and handed to the function set when it is built,
//! so two configurations can coexist in one process (as the tests do).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::DEFAULT_SHELL_TIMEOUT;

/// Settings consumed by template functions during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Whether privileged functions (`from_file`, `shell`) may run
    pub trusted: bool,
    /// Absolute base directory for relative `from_file` paths
    pub data_dir: PathBuf,
    /// Bounded wait of the `shell` function
    pub shell_timeout: Duration,
}

impl RenderConfig {
    /// Build the configuration for a run.
    ///
    /// `data_dir` becomes the absolute directory of the last data file, or the
    /// current directory when no data file was given.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the current directory cannot be determined.
    pub fn new(
        trusted: bool,
        data_files: &[PathBuf],
        shell_timeout: Duration,
    ) -> std::io::Result<Self> {
        let data_dir = match data_files.last() {
            Some(last) => {
                let parent = last.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
                std::path::absolute(parent)?
            }
            None => std::env::current_dir()?,
        };

        tracing::debug!(
            "render config: trusted={}, data_dir={}, shell_timeout={:?}",
            trusted,
            data_dir.display(),
            shell_timeout
        );

        Ok(Self {
            trusted,
            data_dir,
            shell_timeout,
        })
    }

    /// Resolve a path given to `from_file`.
    ///
    /// Absolute paths are returned unchanged; relative ones are joined onto
    /// [`data_dir`](Self::data_dir).
    #[must_use]
    pub fn resolve_data_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            trusted: false,
            data_dir: PathBuf::from("."),
            shell_timeout: DEFAULT_SHELL_TIMEOUT,
        }
    }
}

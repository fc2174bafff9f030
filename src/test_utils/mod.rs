//! Test utilities for tpl
//!
//! Helpers shared by unit tests and, through the `test-utils` feature, by the
//! integration suite:
//! - [`init_test_logging`] to see `tracing` output from a test run
//! - [`TestWorkspace`], a temporary directory with helpers to lay out templates
//!   and data files
//!
//! # Example
//!
//! ```rust,no_run
//! use tpl_cli::test_utils::TestWorkspace;
//!
//! let ws = TestWorkspace::new();
//! let template = ws.write_file("hello.tmpl", "Hello {{ name }}");
//! let data = ws.write_file("data.toml", "name = \"World\"\n");
//! assert!(template.exists() && data.exists());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=tpl_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A temporary directory holding the files of one test.
///
/// Removed when dropped.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Create an empty workspace.
    ///
    /// # Panics
    ///
    /// If the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        init_test_logging(None);
        Self {
            temp_dir: TempDir::new().expect("create temporary workspace"),
        }
    }

    /// Root of the workspace.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the workspace.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    ///
    /// # Panics
    ///
    /// If the file cannot be written.
    pub fn write_file(&self, relative: impl AsRef<Path>, content: &str) -> PathBuf {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, content).expect("write workspace file");
        path
    }

    /// Contents of `relative`, `None` when it does not exist.
    #[must_use]
    pub fn read_file(&self, relative: impl AsRef<Path>) -> Option<String> {
        fs::read_to_string(self.join(relative)).ok()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

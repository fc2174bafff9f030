//! Common test utilities and fixtures for tpl integration tests
//!
//! Every test works in its own temporary project directory and runs the `tpl`
//! binary with that directory as the working directory, so relative template
//! paths and globs behave as they do for a user.

// Not every helper is used by every test module
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tpl_cli::test_utils::TestWorkspace;

/// A temporary project directory plus a `tpl` command bound to it.
pub struct TestProject {
    workspace: TestWorkspace,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        Self {
            workspace: TestWorkspace::new(),
        }
    }

    /// Project root
    pub fn path(&self) -> &Path {
        self.workspace.path()
    }

    /// Write a file relative to the project root
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        self.workspace.write_file(relative, content)
    }

    /// Read a file relative to the project root, `None` when absent
    pub fn read(&self, relative: &str) -> Option<String> {
        self.workspace.read_file(relative)
    }

    /// A `tpl` command running in the project root with a clean environment
    pub fn tpl(&self) -> Command {
        let mut cmd = Command::cargo_bin("tpl").unwrap();
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("TPL_SHELL_TIMEOUT")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

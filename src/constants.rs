//! Global constants used throughout the tpl codebase.
//!
//! This module contains timeout durations and the small set of textual
//! conventions (comment markers, version line) that several modules share.

use std::time::Duration;

/// Default bounded wait for the `shell` template function, in seconds.
pub const DEFAULT_SHELL_TIMEOUT_SECS: u64 = 60;

/// Default bounded wait for the `shell` template function.
///
/// A child process still running after this long is killed and the run
/// terminates.
pub const DEFAULT_SHELL_TIMEOUT: Duration = Duration::from_secs(DEFAULT_SHELL_TIMEOUT_SECS);

/// Environment variable that overrides `--shell-timeout`.
pub const SHELL_TIMEOUT_ENV: &str = "TPL_SHELL_TIMEOUT";

/// Line prefixes recognised as comments when extracting a preamble.
///
/// Matched after leading whitespace is stripped.
pub const PREAMBLE_COMMENT_MARKERS: &[&str] = &["#", "//", "--", ";"];

/// Width of a tab stop used by the `table` helper when aligning columns.
pub const TABLE_TAB_WIDTH: usize = 8;

/// Display name used for standard input in diagnostics.
pub const STDIN_SOURCE_NAME: &str = "<stdin>";

/// Version line printed by `--version`.
#[must_use]
pub fn version_line() -> String {
    format!("tpl {}", env!("CARGO_PKG_VERSION"))
}

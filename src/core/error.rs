//! Error handling for tpl
//!
//! This module provides the typed errors of the tool and the translation of any
//! failure into what the user sees on stderr. Two principles drive it:
//! 1. **Strongly-typed errors** ([`TplError`]) for conditions the tool detects itself
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and suggestions
//!
//! # Fatal failures
//!
//! Privileged template functions never exit the process themselves. They return a
//! [`FunctionError`] that Tera carries up in its error chain; [`fatal_exit`] finds
//! it at the top-level boundary and tells `main` which exit code to use.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tpl_cli::core::{TplError, user_friendly_error};
//!
//! let err = anyhow::Error::from(TplError::PreambleRequiresOutputFile);
//! user_friendly_error(err).display();
//! ```

use std::fmt;
use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

use crate::templating::error::{FunctionError, TemplateError};

/// The main error type for tpl operations
#[derive(Error, Debug, Clone)]
pub enum TplError {
    /// `--preserve-preamble` needs a destination file to read the preamble from.
    #[error("--preserve-preamble specified but output is stdout.  Specify output filename with -o")]
    PreambleRequiresOutputFile,

    /// A `--glob` pattern is not valid glob syntax.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob {
        /// Pattern as given on the command line
        pattern: String,
        /// Parser message
        reason: String,
    },

    /// A `--glob` pattern matched no files.
    #[error("error parsing glob {pattern}: pattern matches no files")]
    GlobNoMatch {
        /// Pattern as given on the command line
        pattern: String,
    },

    /// The files matched by a `--glob` pattern could not be read or parsed.
    #[error("error parsing glob {pattern}: {reason}")]
    GlobParse {
        /// Pattern as given on the command line
        pattern: String,
        /// Engine or I/O message
        reason: String,
    },

    /// A template file could not be read or parsed.
    #[error("error parsing file {}: {reason}", .path.display())]
    TemplateParse {
        /// Offending template file
        path: PathBuf,
        /// Engine or I/O message
        reason: String,
    },

    /// A data file could not be opened or read.
    #[error("failed to read data file {}: {reason}", .path.display())]
    DataRead {
        /// Offending data file
        path: PathBuf,
        /// I/O message
        reason: String,
    },

    /// A data source could not be decoded.
    #[error("failed to decode {source_name} as {format}: {reason}")]
    DataDecode {
        /// Path or `<stdin>`
        source_name: String,
        /// Decoder tag
        format: String,
        /// Decoder message
        reason: String,
    },

    /// Nothing was loaded into the registry.
    #[error("no templates found")]
    NoTemplates,

    /// Selection needs `--name` because only globs were given.
    #[error(
        "the --name flag is required when multiple templates are defined and no default template exists.  Existing template names:\n{}",
        format_names(.loaded)
    )]
    NameRequired {
        /// Every loaded template name, in load order
        loaded: Vec<String>,
    },

    /// The first explicit template file has no registry entry under its base name.
    ///
    /// This is a loader/engine naming mismatch, not a user error.
    #[error("unexpected: unable to find the first template '{file_name}'. Use --name.")]
    EntryPointMissing {
        /// Base file name that was searched for
        file_name: String,
    },

    /// Writing the rendered output failed.
    #[error("failed to write output to {target}: {reason}")]
    OutputWrite {
        /// `stdout` or the destination path
        target: String,
        /// I/O message
        reason: String,
    },

    /// Catch-all with a preformatted message.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

fn format_names(names: &[String]) -> String {
    names.iter().enumerate().map(|(i, name)| format!("{i}: '{name}'\n")).collect()
}

/// User-friendly error wrapper with optional details and suggestion
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: TplError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`TplError`]
    #[must_use]
    pub const fn new(error: TplError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`]
///
/// The message always carries the full chain of stage labels
/// (`render: template 'x': ...`) so the failing step is visible.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = format_chain(&error);

    if let Some(tpl_error) = error.downcast_ref::<TplError>() {
        let ctx = ErrorContext::new(TplError::Other {
            message,
        });
        return match tpl_error {
            TplError::PreambleRequiresOutputFile => {
                ctx.with_suggestion("Pass -o <file> so the existing preamble can be read and rewritten")
            }
            TplError::NameRequired {
                ..
            } => ctx.with_suggestion("Pick one of the names above with --name <name>"),
            TplError::EntryPointMissing {
                ..
            } => ctx
                .with_details("The first template file did not register under its base file name")
                .with_suggestion("Select the entry point explicitly with --name <name>"),
            TplError::GlobNoMatch {
                ..
            } => ctx.with_suggestion(
                "Quote the pattern so the shell does not expand it, and check it is relative to the current directory",
            ),
            TplError::DataDecode {
                ..
            } => ctx.with_suggestion(
                "Check the data syntax, or select the matching format with --decoder json|yaml|toml",
            ),
            _ => ctx,
        };
    }

    for cause in error.chain() {
        if let Some(template_error) = cause.downcast_ref::<TemplateError>() {
            let ctx = ErrorContext::new(TplError::Other {
                message,
            });
            return match template_error {
                TemplateError::VariableNotFound {
                    ..
                } => ctx.with_details(
                    "Templates render in strict mode: every referenced variable must exist in the merged data",
                ),
                TemplateError::TemplateNotFound {
                    ..
                } => ctx.with_suggestion("Check the value passed to --name against the loaded template names"),
                TemplateError::Render {
                    ..
                } => ctx,
            };
        }
    }

    ErrorContext::new(TplError::Other {
        message,
    })
}

// A TemplateError already flattens the engine chain below it.
fn format_chain(error: &anyhow::Error) -> String {
    let mut parts = Vec::new();
    for cause in error.chain() {
        parts.push(cause.to_string());
        if cause.is::<TemplateError>() {
            break;
        }
    }
    parts.join(": ")
}

/// A failure that terminates the run with a specific exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalExit {
    /// Process exit code
    pub code: i32,
    /// Diagnostic printed after `fatal: `
    pub message: String,
    /// Child process stderr to echo, if any
    pub stderr: Option<String>,
}

impl FatalExit {
    /// Print the diagnostic to stderr.
    pub fn display(&self) {
        eprintln!("{}: {}", "fatal".red().bold(), self.message);
        if let Some(stderr) = &self.stderr {
            eprintln!("stderr: {stderr}");
        }
    }
}

/// Look for a fatal [`FunctionError`] anywhere in the error chain.
///
/// Returns `None` for ordinary failures, which take the normal
/// [`user_friendly_error`] path with exit code 1.
#[must_use]
pub fn fatal_exit(error: &anyhow::Error) -> Option<FatalExit> {
    error.chain().find_map(|cause| {
        let function_error = cause.downcast_ref::<FunctionError>()?;
        function_error.is_fatal().then(|| FatalExit {
            code: function_error.exit_code(),
            message: function_error.to_string(),
            stderr: function_error.captured_stderr().map(str::to_string),
        })
    })
}

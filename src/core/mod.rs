//! Core types for tpl
//!
//! Error types and their user-facing presentation. See [`error`] for the taxonomy
//! and for how fatal template-function failures are turned into exit codes.

pub mod error;

pub use error::{ErrorContext, FatalExit, TplError, fatal_exit, user_friendly_error};

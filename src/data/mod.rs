//! Structured data sources and the merged template context.
//!
//! A run reads its data files in command-line order, then standard input, decodes
//! each with the active [`DataFormat`] and folds the fragments with
//! [`merge_into`]. Standard input is merged last and so has the highest
//! precedence: a file can provide defaults that piped data overrides.
//!
//! # Modules
//!
//! - [`decoder`] - JSON / YAML / TOML decoding into context fragments
//! - [`merge`] - recursive merge of fragments

pub mod decoder;
pub mod merge;

pub use decoder::{ContextMap, DataFormat};
pub use merge::{merge_all, merge_into};

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use crate::constants::STDIN_SOURCE_NAME;
use crate::core::TplError;

/// The ordered data inputs of one run.
#[derive(Debug, Clone, Default)]
pub struct DataSources {
    /// Data files in command-line order
    pub files: Vec<PathBuf>,
    /// Bytes read from standard input, `None` when absent
    pub stdin: Option<Vec<u8>>,
}

impl DataSources {
    /// Create data sources from files and optional standard input bytes.
    #[must_use]
    pub const fn new(files: Vec<PathBuf>, stdin: Option<Vec<u8>>) -> Self {
        Self {
            files,
            stdin,
        }
    }

    /// Decode every source and merge them into one context.
    ///
    /// Files are merged in order, standard input last. Empty sources are skipped;
    /// with no sources at all the context is empty.
    ///
    /// # Errors
    ///
    /// - [`TplError::DataRead`] when a file cannot be read
    /// - [`TplError::DataDecode`] when a source is not valid for `format`
    pub fn build_context(&self, format: DataFormat) -> Result<ContextMap, TplError> {
        let mut fragments = Vec::with_capacity(self.files.len() + 1);

        for path in &self.files {
            let bytes = std::fs::read(path).map_err(|e| TplError::DataRead {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            fragments.extend(format.decode(&bytes, &path.display().to_string())?);
        }

        if let Some(bytes) = &self.stdin {
            fragments.extend(format.decode(bytes, STDIN_SOURCE_NAME)?);
        }

        let context = merge_all(fragments);
        tracing::debug!(
            "context built from {} file(s){}: {} top-level key(s)",
            self.files.len(),
            if self.stdin.is_some() { " and stdin" } else { "" },
            context.len()
        );
        Ok(context)
    }
}

/// Read standard input when it is piped or redirected.
///
/// An interactive terminal counts as absent input, so `tpl` never blocks waiting
/// for a user to type data.
///
/// # Errors
///
/// Returns the I/O error if reading a piped standard input fails.
pub fn read_stdin_if_piped() -> std::io::Result<Option<Vec<u8>>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut bytes = Vec::new();
    stdin.lock().read_to_end(&mut bytes)?;
    Ok(Some(bytes))
}

//! Choice of the template to execute.
//!
//! 1. `--name` wins and is used verbatim; a name that is not loaded fails later,
//!    at render time, with suggestions.
//! 2. Otherwise the first explicit template file is the entry point. The registry is
//!    searched for its base file name rather than trusting any enumeration order.
//! 3. Otherwise (globs only) the user has to pick, and the error lists every
//!    loaded name in load order.

use std::path::PathBuf;

use super::registry::{TemplateRegistry, template_name};
use crate::core::TplError;

/// Pick the name of the template to render.
///
/// # Errors
///
/// - [`TplError::NoTemplates`] when nothing was loaded
/// - [`TplError::EntryPointMissing`] when the first template file is not in the registry
/// - [`TplError::NameRequired`] when only globs were given and no `--name`
pub fn select_template(
    registry: &TemplateRegistry,
    name: Option<&str>,
    template_files: &[PathBuf],
) -> Result<String, TplError> {
    if registry.is_empty() {
        return Err(TplError::NoTemplates);
    }

    if let Some(name) = name {
        tracing::debug!("selected '{}' from --name", name);
        return Ok(name.to_string());
    }

    if let Some(first) = template_files.first() {
        let wanted = template_name(first);
        return registry
            .names()
            .iter()
            .find(|loaded| **loaded == wanted)
            .cloned()
            .inspect(|selected| tracing::debug!("selected '{}' from first template file", selected))
            .ok_or(TplError::EntryPointMissing {
                file_name: wanted,
            });
    }

    Err(TplError::NameRequired {
        loaded: registry.names().to_vec(),
    })
}

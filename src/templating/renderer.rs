//! Renderer: executes the selected template into an in-memory document.
//!
//! Nothing is written while rendering. The caller receives the whole document
//! (preamble, body, optional trailing newline) and hands it to
//! [`output`](crate::output), so a failing render never leaves partial output.

use super::error::TemplateError;
use super::registry::TemplateRegistry;
use crate::data::ContextMap;

/// Rendering options of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    no_newline: bool,
}

impl Renderer {
    /// Create a renderer; `no_newline` suppresses the trailing newline.
    #[must_use]
    pub const fn new(no_newline: bool) -> Self {
        Self {
            no_newline,
        }
    }

    /// Render `name` against `context` and assemble the output document.
    ///
    /// `preamble` is placed verbatim before the body.
    ///
    /// # Errors
    ///
    /// Any [`TemplateError`] from the engine, including function failures in its
    /// source chain.
    pub fn render(
        &self,
        registry: &TemplateRegistry,
        name: &str,
        context: &ContextMap,
        preamble: &str,
    ) -> Result<String, TemplateError> {
        let body = registry.render(name, context)?;

        let mut document = String::with_capacity(preamble.len() + body.len() + 1);
        document.push_str(preamble);
        document.push_str(&body);
        if !self.no_newline {
            document.push('\n');
        }

        tracing::debug!(
            "rendered '{}': {} byte(s), preamble {} byte(s)",
            name,
            document.len(),
            preamble.len()
        );
        Ok(document)
    }
}

//! Tera-based template loading, selection and rendering.
//!
//! # Overview
//!
//! A run builds one [`TemplateRegistry`]: a Tera instance that already carries the
//! run's function set, plus an index of template names in load order. Templates
//! are added in command-line order, the [selector](selector) picks the entry
//! point, and the [`Renderer`] produces the output document in memory.
//!
//! # Syntax
//!
//! Templates use Tera syntax: `{{ name }}`, `{% if %}`, `{% for %}`,
//! `{% include "other.tmpl" %}`, `{% extends "base.tmpl" %}` and macros. Rendering is
//! strict: referencing a variable that the merged data does not define is an error.
//! Autoescaping is off for every template, whatever its extension.
//!
//! # Functions
//!
//! Tera's built-in filters and functions are always available, together with
//! `to_yaml`, `must_to_yaml` and `table`. The privileged `from_file` and `shell`
//! require `--trusted`; see [`functions`].
//!
//! # Examples
//!
//! ```text
//! {# report.tmpl #}
//! {% for host in hosts %}{{ host.name | upper }}: {{ host.addr }}
//! {% endfor %}
//! {{ hosts | table }}
//! ```

pub mod error;
pub mod functions;
pub mod helpers;
pub mod registry;
pub mod renderer;
pub mod selector;
pub mod shell;

pub use error::{FunctionError, TemplateError};
pub use registry::TemplateRegistry;
pub use renderer::Renderer;
pub use selector::select_template;

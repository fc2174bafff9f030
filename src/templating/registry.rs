//! Template registry: the Tera engine plus an ordered name index.
//!
//! Tera keeps its templates in a hash map, so its enumeration order says nothing
//! about the order templates were loaded in. Everything user-visible (the list of
//! names in a "--name required" error, the first-position rule for a replaced
//! name) goes through [`TemplateRegistry::names`] instead, which records load order.
//!
//! # Naming
//!
//! A template is registered under its base file name: `layouts/page.tmpl` becomes
//! `page.tmpl`. Loading a second file with the same base name replaces the body;
//! the name keeps its first position in the index.
//!
//! # Load order
//!
//! Tera resolves `{% extends %}` and `{% import %}` when templates are added. The
//! files of one glob are added together, so they may refer to each other freely;
//! across sources, a parent must come from an earlier glob or file than its child.

use std::path::Path;

use regex::Regex;
use strsim::levenshtein;
use tera::{Context, Tera, Value};

use super::error::{TemplateError, format_tera_error};
use super::functions::register_functions;
use crate::cli::classify::TemplateSource;
use crate::config::RenderConfig;
use crate::core::TplError;
use crate::data::ContextMap;

/// Maximum Levenshtein distance, as a percentage of the target length, for a
/// name to be offered as a suggestion.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Named, parsed templates of one run.
pub struct TemplateRegistry {
    tera: Tera,
    order: Vec<String>,
}

impl TemplateRegistry {
    /// Create an empty registry whose engine already carries the run's functions.
    #[must_use]
    pub fn new(config: &RenderConfig) -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        register_functions(&mut tera, config);

        Self {
            tera,
            order: Vec::new(),
        }
    }

    /// Load every source in order.
    ///
    /// # Errors
    ///
    /// Stops at the first source that fails, see [`load_glob`](Self::load_glob) and
    /// [`load_file`](Self::load_file).
    pub fn load_all(&mut self, sources: &[TemplateSource]) -> Result<(), TplError> {
        for source in sources {
            match source {
                TemplateSource::Glob(pattern) => {
                    self.load_glob(pattern)?;
                }
                TemplateSource::File(path) => self.load_file(path)?,
            }
        }

        tracing::debug!("loaded {} template(s): {:?}", self.order.len(), self.order);
        Ok(())
    }

    /// Expand `pattern` and load every matched file. Returns the number loaded.
    ///
    /// Matches are taken in the sorted order the expansion yields; directories and
    /// other non-files are skipped.
    ///
    /// # Errors
    ///
    /// - [`TplError::InvalidGlob`] for bad pattern syntax or an unreadable directory
    /// - [`TplError::GlobNoMatch`] when no file matches
    /// - [`TplError::GlobParse`] when a matched file cannot be read or parsed
    pub fn load_glob(&mut self, pattern: &str) -> Result<usize, TplError> {
        let invalid = |reason: String| TplError::InvalidGlob {
            pattern: pattern.to_string(),
            reason,
        };

        let mut batch: Vec<(String, String)> = Vec::new();
        for entry in glob::glob(pattern).map_err(|e| invalid(e.to_string()))? {
            let path = entry.map_err(|e| invalid(e.to_string()))?;
            if !path.is_file() {
                tracing::debug!("glob {}: skipping non-file {}", pattern, path.display());
                continue;
            }

            let body = std::fs::read_to_string(&path).map_err(|e| TplError::GlobParse {
                pattern: pattern.to_string(),
                reason: format!("{}: {e}", path.display()),
            })?;
            batch.push((template_name(&path), body));
        }

        if batch.is_empty() {
            return Err(TplError::GlobNoMatch {
                pattern: pattern.to_string(),
            });
        }

        let count = batch.len();
        let names: Vec<String> = batch.iter().map(|(name, _)| name.clone()).collect();
        self.tera.add_raw_templates(batch).map_err(|e| TplError::GlobParse {
            pattern: pattern.to_string(),
            reason: format_tera_error(&e),
        })?;
        for name in names {
            self.record(name);
        }

        tracing::debug!("glob {}: loaded {} file(s)", pattern, count);
        Ok(count)
    }

    /// Load one explicit template file.
    ///
    /// # Errors
    ///
    /// [`TplError::TemplateParse`] naming `path` when it cannot be read or parsed.
    pub fn load_file(&mut self, path: &Path) -> Result<(), TplError> {
        let parse_error = |reason: String| TplError::TemplateParse {
            path: path.to_path_buf(),
            reason,
        };

        let body = std::fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
        let name = template_name(path);
        self.tera.add_raw_template(&name, &body).map_err(|e| parse_error(format_tera_error(&e)))?;

        tracing::debug!("loaded {} as '{}'", path.display(), name);
        self.record(name);
        Ok(())
    }

    fn record(&mut self, name: String) {
        if self.order.contains(&name) {
            tracing::debug!("template '{}' replaced by a later file", name);
        } else {
            self.order.push(name);
        }
    }

    /// Loaded template names in load order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Whether nothing has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Render template `name` against `context`.
    ///
    /// # Errors
    ///
    /// A [`TemplateError`] wrapping the engine error, with suggestions for an
    /// unknown variable or template name.
    pub fn render(&self, name: &str, context: &ContextMap) -> Result<String, TemplateError> {
        let tera_context = Context::from_value(Value::Object(context.clone())).map_err(|e| {
            TemplateError::Render {
                template: name.to_string(),
                message: format_tera_error(&e),
                source: e,
            }
        })?;

        tracing::debug!("rendering '{}'", name);
        self.tera.render(name, &tera_context).map_err(|e| self.enrich(name, e, context))
    }

    fn enrich(&self, name: &str, error: tera::Error, context: &ContextMap) -> TemplateError {
        if let tera::ErrorKind::TemplateNotFound(missing) = &error.kind
            && missing == name
        {
            return TemplateError::TemplateNotFound {
                name: name.to_string(),
                suggestions: find_similar(name, &self.order),
                source: error,
            };
        }

        if let Some(variable) = find_missing_variable(&error) {
            let available = context_paths(context);
            return TemplateError::VariableNotFound {
                template: name.to_string(),
                suggestions: find_similar(&variable, &available),
                variable,
                source: error,
            };
        }

        TemplateError::Render {
            template: name.to_string(),
            message: format_tera_error(&error),
            source: error,
        }
    }
}

/// Registry name of a template file: its base file name.
#[must_use]
pub fn template_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Extract the variable from Tera's "Variable `x` not found" anywhere in the chain.
fn find_missing_variable(error: &tera::Error) -> Option<String> {
    use std::error::Error;

    let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
    let mut current: Option<&dyn Error> = Some(error);
    while let Some(err) = current {
        if let Some(caps) = re.captures(&err.to_string())
            && let Some(m) = caps.get(1)
        {
            return Some(m.as_str().to_string());
        }
        current = err.source();
    }
    None
}

/// Every dotted key path of the context (`a`, `a.b`, ...).
fn context_paths(context: &ContextMap) -> Vec<String> {
    fn walk(prefix: &str, map: &ContextMap, out: &mut Vec<String>) {
        for (key, value) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            if let Value::Object(nested) = value {
                walk(&path, nested, out);
            }
            out.push(path);
        }
    }

    let mut paths = Vec::new();
    walk("", context, &mut paths);
    paths
}

/// Up to three candidates closest to `target` by Levenshtein distance.
fn find_similar(target: &str, candidates: &[String]) -> Vec<String> {
    let limit = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
    let mut scored: Vec<(usize, &String)> = candidates
        .iter()
        .map(|candidate| (levenshtein(target, candidate), candidate))
        .filter(|(distance, _)| *distance <= limit)
        .collect();

    scored.sort_by_key(|(distance, _)| *distance);
    scored.into_iter().take(3).map(|(_, candidate)| candidate.clone()).collect()
}

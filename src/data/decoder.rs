//! Decoding of data sources into context fragments.
//!
//! Every supported format is decoded into the same tree representation
//! ([`serde_json::Value`], which is also what Tera consumes) so that the merger
//! and the renderer never care where a value came from.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::TplError;

/// A decoded mapping: one data source, or the merged context.
pub type ContextMap = Map<String, Value>;

/// Serialization format of the data sources.
///
/// The format's [`tag`](Self::tag) doubles as the file extension that marks a
/// positional argument as a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DataFormat {
    /// JSON, optionally a stream of several documents
    Json,
    /// YAML, optionally several `---` separated documents
    Yaml,
    /// TOML
    #[default]
    Toml,
}

impl DataFormat {
    /// Name of the format, also the data-file extension without the dot.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }

    /// Decode `bytes` into a context fragment.
    ///
    /// Returns `Ok(None)` when the input is empty or whitespace only, so that an
    /// empty source contributes nothing instead of failing.
    ///
    /// # Errors
    ///
    /// [`TplError::DataDecode`] naming `source_name` when the input is not valid
    /// for this format or its top level is not a mapping.
    pub fn decode(self, bytes: &[u8], source_name: &str) -> Result<Option<ContextMap>, TplError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!("{} is empty, skipping", source_name);
            return Ok(None);
        }

        let fragment = match self {
            Self::Json => self.decode_json(bytes, source_name)?,
            Self::Yaml => self.decode_yaml(bytes, source_name)?,
            Self::Toml => self.decode_toml(bytes, source_name)?,
        };

        tracing::debug!("decoded {} as {}: {} top-level key(s)", source_name, self, fragment.len());
        Ok(Some(fragment))
    }

    fn decode_json(self, bytes: &[u8], source_name: &str) -> Result<ContextMap, TplError> {
        let mut fragment = ContextMap::new();
        for document in serde_json::Deserializer::from_slice(bytes).into_iter::<Value>() {
            let document = document.map_err(|e| self.error(source_name, e))?;
            self.apply_document(&mut fragment, document, source_name)?;
        }
        Ok(fragment)
    }

    // Merge keys (`<<: *anchor`) are resolved before conversion.
    fn decode_yaml(self, bytes: &[u8], source_name: &str) -> Result<ContextMap, TplError> {
        let mut fragment = ContextMap::new();
        for document in serde_yaml::Deserializer::from_slice(bytes) {
            let mut document =
                serde_yaml::Value::deserialize(document).map_err(|e| self.error(source_name, e))?;
            document.apply_merge().map_err(|e| self.error(source_name, e))?;
            let document =
                serde_json::to_value(document).map_err(|e| self.error(source_name, e))?;
            self.apply_document(&mut fragment, document, source_name)?;
        }
        Ok(fragment)
    }

    fn decode_toml(self, bytes: &[u8], source_name: &str) -> Result<ContextMap, TplError> {
        let text = std::str::from_utf8(bytes).map_err(|e| self.error(source_name, e))?;
        let table: toml::Table = toml::from_str(text).map_err(|e| self.error(source_name, e))?;
        Ok(table.into_iter().map(|(key, value)| (key, toml_to_json(value))).collect())
    }

    // Later documents of a stream replace earlier top-level keys.
    fn apply_document(
        self,
        fragment: &mut ContextMap,
        document: Value,
        source_name: &str,
    ) -> Result<(), TplError> {
        match document {
            Value::Object(map) => {
                fragment.extend(map);
                Ok(())
            }
            Value::Null => Ok(()),
            other => Err(self.error(
                source_name,
                format!("top level must be a mapping, found {}", value_kind(&other)),
            )),
        }
    }

    fn error(self, source_name: &str, reason: impl fmt::Display) -> TplError {
        TplError::DataDecode {
            source_name: source_name.to_string(),
            format: self.tag().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            Value::Object(table.into_iter().map(|(key, value)| (key, toml_to_json(value))).collect())
        }
    }
}

/// Short name of a value's shape, for diagnostics.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

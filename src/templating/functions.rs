//! Template function set and trust gate.
//!
//! Everything templates can call beyond Tera's built-ins is registered here, once
//! per run and before any template is added (Tera checks inheritance and macros at
//! add time, and the function table must be complete by then).
//!
//! # Privileged functions
//!
//! | Function | Purpose |
//! |---|---|
//! | `from_file(path="...")` | contents of a file, relative paths resolved against the data directory |
//! | `shell(cmd="...", args=[...])` | standard output of a program run with a bounded wait |
//!
//! Both check [`RenderConfig::trusted`] before doing anything. Without it they
//! return [`FunctionError::TrustViolation`], which aborts the run with a fatal
//! diagnostic once it reaches `main`.
//!
//! # Unprivileged filters
//!
//! `to_yaml`, `must_to_yaml` and `table`, see [`helpers`](super::helpers).

use std::collections::HashMap;
use std::path::Path;

use tera::{Tera, Value};

use super::error::FunctionError;
use super::helpers;
use super::shell::run_command;
use crate::config::RenderConfig;

/// Register the filters and functions of a run on `tera`.
pub fn register_functions(tera: &mut Tera, config: &RenderConfig) {
    tera.register_filter("to_yaml", helpers::to_yaml);
    tera.register_filter("must_to_yaml", helpers::must_to_yaml);
    tera.register_filter("table", helpers::table);

    tera.register_function("from_file", create_from_file_function(config.clone()));
    tera.register_function("shell", create_shell_function(config.clone()));

    tracing::debug!("registered template functions (trusted: {})", config.trusted);
}

/// Create the `from_file` function bound to `config`.
///
/// ```text
/// {{ from_file(path="snippets/header.txt") }}
/// ```
pub fn create_from_file_function(config: RenderConfig) -> impl tera::Function + 'static {
    move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        ensure_trusted(&config, "from_file")?;

        let path = args.get("path").and_then(Value::as_str).ok_or_else(|| {
            into_tera(FunctionError::InvalidArgument {
                function: "from_file",
                message: "missing string argument `path`".to_string(),
            })
        })?;

        let resolved = config.resolve_data_path(Path::new(path));
        tracing::debug!("from_file: reading {}", resolved.display());

        std::fs::read_to_string(&resolved).map(Value::String).map_err(|source| {
            into_tera(FunctionError::FileRead {
                path: resolved,
                source,
            })
        })
    }
}

/// Create the `shell` function bound to `config`.
///
/// ```text
/// {{ shell(cmd="git", args=["rev-parse", "--short", "HEAD"]) }}
/// ```
pub fn create_shell_function(config: RenderConfig) -> impl tera::Function + 'static {
    move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        ensure_trusted(&config, "shell")?;

        let command = args.get("cmd").and_then(Value::as_str).ok_or_else(|| {
            into_tera(FunctionError::InvalidArgument {
                function: "shell",
                message: "missing string argument `cmd`".to_string(),
            })
        })?;
        let command_args = shell_args(args.get("args")).map_err(into_tera)?;

        run_command(command, &command_args, config.shell_timeout)
            .map(Value::String)
            .map_err(into_tera)
    }
}

fn shell_args(value: Option<&Value>) -> Result<Vec<String>, FunctionError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().map(plain_text).collect()),
        Some(Value::String(single)) => Ok(vec![single.clone()]),
        Some(other) => Err(FunctionError::InvalidArgument {
            function: "shell",
            message: format!("`args` must be a sequence of strings, got {other}"),
        }),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn ensure_trusted(config: &RenderConfig, function: &'static str) -> tera::Result<()> {
    if config.trusted {
        Ok(())
    } else {
        tracing::warn!("{} called without --trusted", function);
        Err(into_tera(FunctionError::TrustViolation {
            function,
        }))
    }
}

// Keep the FunctionError as the source so it stays reachable from the top-level chain.
fn into_tera(error: FunctionError) -> tera::Error {
    tera::Error::chain(error.to_string(), error)
}

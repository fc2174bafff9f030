//! Unprivileged template filters.
//!
//! - `to_yaml`: YAML serialization, empty string when the value cannot be serialized
//! - `must_to_yaml`: same, but a serialization failure fails the render
//! - `table`: a sequence of mappings or of sequences as tab-aligned columns

use std::collections::HashMap;

use tera::Value;

use crate::constants::TABLE_TAB_WIDTH;

/// `{{ value | to_yaml }}`
pub fn to_yaml(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match serde_yaml::to_string(value) {
        Ok(yaml) => Ok(Value::String(yaml)),
        Err(e) => {
            tracing::debug!("to_yaml: serialization failed, rendering empty string: {}", e);
            Ok(Value::String(String::new()))
        }
    }
}

/// `{{ value | must_to_yaml }}`
pub fn must_to_yaml(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    serde_yaml::to_string(value)
        .map(Value::String)
        .map_err(|e| tera::Error::chain("must_to_yaml: failed to serialize value", e))
}

/// `{{ rows | table }}`
///
/// Renders nothing for input it cannot lay out: a non-sequence, an empty
/// sequence, or rows that are not all of the first row's shape.
pub fn table(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(render_table(value).unwrap_or_default()))
}

/// Lay out `value` as a table, `None` when it has no tabular shape.
#[must_use]
pub fn render_table(value: &Value) -> Option<String> {
    let rows = value.as_array().filter(|rows| !rows.is_empty())?;

    let lines = match rows.first()? {
        Value::Object(first) => {
            let mut keys: Vec<&String> = first.keys().collect();
            keys.sort();

            let mut lines = vec![keys.iter().map(|key| key.to_uppercase()).collect::<Vec<_>>()];
            for row in rows {
                let row = row.as_object()?;
                lines.push(
                    keys.iter()
                        .map(|key| row.get(key.as_str()).map(cell_text).unwrap_or_default())
                        .collect(),
                );
            }
            lines
        }
        Value::Array(first) => {
            let width = first.len();
            let mut lines = Vec::with_capacity(rows.len());
            for row in rows {
                let row = row.as_array().filter(|row| row.len() == width)?;
                lines.push(row.iter().map(cell_text).collect());
            }
            lines
        }
        _ => return None,
    };

    Some(align(&lines))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

// Every cell but the last of a line is padded with tabs up to the smallest tab
// stop strictly past the widest cell of its column.
fn align(lines: &[Vec<String>]) -> String {
    let columns = lines.iter().map(Vec::len).max().unwrap_or(0);
    let mut stops = vec![0usize; columns];
    for line in lines {
        for (column, cell) in line.iter().enumerate().take(line.len().saturating_sub(1)) {
            stops[column] = stops[column].max(cell.chars().count());
        }
    }
    for stop in &mut stops {
        *stop = (*stop / TABLE_TAB_WIDTH + 1) * TABLE_TAB_WIDTH;
    }

    let mut out = String::new();
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        for (column, cell) in line.iter().enumerate() {
            out.push_str(cell);
            if column + 1 < line.len() {
                let width = cell.chars().count();
                let tabs = (stops[column] - width).div_ceil(TABLE_TAB_WIDTH);
                out.extend(std::iter::repeat_n('\t', tabs));
            }
        }
    }
    out
}

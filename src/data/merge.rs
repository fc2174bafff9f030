//! Deep merge of context fragments.
//!
//! Mappings merge recursively; everything else (scalars, sequences, a mapping
//! meeting a non-mapping) is replaced by the later value. Keys are never removed.

use serde_json::Value;

use super::decoder::ContextMap;

/// Merge `src` into `dest`.
///
/// For every key of `src`: when both sides hold a mapping the merge recurses,
/// otherwise `src`'s value overwrites `dest`'s. Sequences are replaced whole.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use tpl_cli::data::merge_into;
///
/// let mut dest = json!({ "a": { "x": 1 }, "keep": true }).as_object().unwrap().clone();
/// let src = json!({ "a": { "y": 2 } }).as_object().unwrap().clone();
///
/// merge_into(&mut dest, src);
/// assert_eq!(serde_json::Value::Object(dest), json!({ "a": { "x": 1, "y": 2 }, "keep": true }));
/// ```
pub fn merge_into(dest: &mut ContextMap, src: ContextMap) {
    for (key, value) in src {
        if let Value::Object(src_map) = value {
            if let Some(Value::Object(dest_map)) = dest.get_mut(&key) {
                merge_into(dest_map, src_map);
                continue;
            }
            dest.insert(key, Value::Object(src_map));
        } else {
            if matches!(dest.get(&key), Some(Value::Object(_))) {
                tracing::trace!("key '{}': mapping replaced by non-mapping value", key);
            }
            dest.insert(key, value);
        }
    }
}

/// Fold fragments left to right into a fresh context.
pub fn merge_all<I>(fragments: I) -> ContextMap
where
    I: IntoIterator<Item = ContextMap>,
{
    fragments.into_iter().fold(ContextMap::new(), |mut acc, fragment| {
        merge_into(&mut acc, fragment);
        acc
    })
}

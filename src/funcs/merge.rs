//! Multi-source deep merge of configuration mappings.
//!
//! Nested mappings merge key by key; every other shape is replaced wholesale
//! by the later source. Sequences are never concatenated.
//!
//! # Shape conflicts
//!
//! When one side holds a mapping and the other does not, the later source wins
//! without error. Data files may deliberately shadow a structured default with a
//! scalar, but an accidental conflict silently drops the whole mapping. A debug
//! event is emitted for each such overwrite.

use serde_json::Value;

use super::Mapping;

/// Merge `sources` left to right into a fresh mapping.
///
/// The result never aliases an input: values are deep-cloned as they are
/// copied in. Zero sources produce an empty mapping.
///
/// # Examples
///
/// ```rust
/// use hclgen::funcs::merge;
/// use serde_json::json;
///
/// let base = json!({"project": {"name": "demo", "labels": {"env": "dev"}}, "zones": ["a"]});
/// let over = json!({"project": {"labels": {"env": "prod"}}, "zones": ["b", "c"]});
///
/// let merged = merge([base.as_object().unwrap(), over.as_object().unwrap()]);
/// assert_eq!(
///     serde_json::Value::Object(merged),
///     json!({"project": {"name": "demo", "labels": {"env": "prod"}}, "zones": ["b", "c"]})
/// );
/// ```
pub fn merge<'a, I>(sources: I) -> Mapping
where
    I: IntoIterator<Item = &'a Mapping>,
{
    let mut dst = Mapping::new();
    for src in sources {
        deep_merge(&mut dst, src);
    }
    dst
}

/// Merge `src` into `dst` in place.
///
/// For each key of `src`: absent in `dst` copies the value; mappings on both
/// sides recurse; anything else replaces the value in `dst`.
pub fn deep_merge(dst: &mut Mapping, src: &Mapping) {
    for (key, src_value) in src {
        match (dst.get_mut(key), src_value) {
            (Some(Value::Object(dst_obj)), Value::Object(src_obj)) => {
                deep_merge(dst_obj, src_obj);
            }
            (Some(dst_value), _) => {
                if dst_value.is_object() != src_value.is_object() {
                    tracing::debug!(
                        "merge: key '{}' changes shape ({} -> {}), later source wins",
                        key,
                        super::kind_name(dst_value),
                        super::kind_name(src_value)
                    );
                }
                *dst_value = src_value.clone();
            }
            (None, _) => {
                dst.insert(key.clone(), src_value.clone());
            }
        }
    }
}

//! Dotted-path lookup over nested mappings.
//!
//! A path such as `project.labels.env` is split on `.` and each segment is
//! looked up in turn, descending into nested mappings. Segments are taken
//! literally: an empty path looks up the key `""`, and `a..b` looks up `""`
//! inside `a`.

use serde_json::Value;

use super::{Mapping, kind_name};
use crate::core::{FuncError, Result};

/// Look up `path` in `m`.
///
/// Returns the value at the final segment unconverted. When a segment is
/// absent, returns `default` if one was supplied and `Value::Null` otherwise.
///
/// # Errors
///
/// Returns [`FuncError::TypeMismatch`] when a non-final segment holds a value
/// that is not a mapping (including an explicit `null`).
///
/// # Examples
///
/// ```rust
/// use hclgen::funcs::get;
/// use serde_json::json;
///
/// let data = json!({"project": {"id": "demo"}});
/// let m = data.as_object().unwrap();
///
/// assert_eq!(get(m, "project.id", None).unwrap(), json!("demo"));
/// assert_eq!(get(m, "project.region", Some(&json!("us-east1"))).unwrap(), json!("us-east1"));
/// assert!(get(m, "billing", None).unwrap().is_null());
/// ```
pub fn get(m: &Mapping, path: &str, default: Option<&Value>) -> Result<Value> {
    let segments: Vec<&str> = path.split('.').collect();
    let last = segments.len() - 1;
    let mut current = m;

    for (i, segment) in segments.iter().enumerate() {
        let Some(value) = current.get(*segment) else {
            return Ok(default.cloned().unwrap_or(Value::Null));
        };

        if i == last {
            return Ok(value.clone());
        }

        current = value.as_object().ok_or_else(|| FuncError::TypeMismatch {
            context: format!("path '{}'", segments[..=i].join(".")),
            expected: "mapping",
            found: kind_name(value),
        })?;
    }

    Ok(Value::Null)
}

/// True when `path` resolves to a non-null value.
///
/// An explicit `null` at the path is reported as absent. Callers that need to
/// tell the two apart should call [`get`] with a sentinel default.
///
/// # Errors
///
/// Propagates the [`FuncError::TypeMismatch`] from [`get`].
pub fn has(m: &Mapping, path: &str) -> Result<bool> {
    Ok(!get(m, path, None)?.is_null())
}

//! JSON text encoding of mappings.

use super::Mapping;
use crate::core::{FuncError, Result};

/// Serialize `m` as compact JSON.
///
/// # Errors
///
/// Returns [`FuncError::JsonEncode`] if serialization fails.
pub fn to_json(m: &Mapping) -> Result<String> {
    serde_json::to_string(m).map_err(|source| FuncError::JsonEncode {
        stage: "marshalling",
        source,
    })
}

/// Serialize `m` as JSON, then escape the result as a JSON string body.
///
/// The returned text has `"`, `\` and control characters escaped but no outer
/// quotes, so it can be spliced into an existing quoted string literal.
///
/// # Errors
///
/// Returns [`FuncError::JsonEncode`] if either step fails.
///
/// # Examples
///
/// ```rust
/// use hclgen::funcs::to_escaped_json;
/// use serde_json::json;
///
/// let m = json!({"a": "b"});
/// assert_eq!(to_escaped_json(m.as_object().unwrap()).unwrap(), r#"{\"a\":\"b\"}"#);
/// ```
pub fn to_escaped_json(m: &Mapping) -> Result<String> {
    let json = to_json(m)?;
    let quoted = serde_json::to_string(&json).map_err(|source| FuncError::JsonEncode {
        stage: "escaping",
        source,
    })?;

    // A serialized string always starts and ends with a quote.
    Ok(quoted[1..quoted.len() - 1].to_string())
}

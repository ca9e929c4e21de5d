//! Resource identifier sanitization.

use super::{Mapping, kind_name};
use crate::core::{FuncError, Result};

/// Key that overrides the default name field when present.
pub const RESOURCE_NAME_KEY: &str = "resource_name";

/// Build a resource identifier from `m`.
///
/// Uses `m["resource_name"]` when present, otherwise `m[key]`. The selected
/// value is lower-cased and every character outside `[a-z0-9_]` becomes `_`.
/// No uniqueness or length check is made: `"a-b"` and `"a.b"` both map to
/// `"a_b"`.
///
/// # Errors
///
/// - [`FuncError::MissingField`] when neither key is present
/// - [`FuncError::TypeMismatch`] when the selected value is not a string
///
/// # Examples
///
/// ```rust
/// use hclgen::funcs::resource_name;
/// use serde_json::json;
///
/// let data = json!({"name": "My Service!"});
/// assert_eq!(resource_name(data.as_object().unwrap(), "name").unwrap(), "my_service_");
/// ```
pub fn resource_name(m: &Mapping, key: &str) -> Result<String> {
    let (field, value) = match m.get(RESOURCE_NAME_KEY) {
        Some(v) => (RESOURCE_NAME_KEY, v),
        None => match m.get(key) {
            Some(v) => (key, v),
            None => {
                return Err(FuncError::MissingField {
                    fields: vec![RESOURCE_NAME_KEY.to_string(), key.to_string()],
                });
            }
        },
    };

    let name = value.as_str().ok_or_else(|| FuncError::TypeMismatch {
        context: format!("field '{field}'"),
        expected: "string",
        found: kind_name(value),
    })?;

    Ok(sanitize(name))
}

/// Lower-case `name` and replace characters outside `[a-z0-9_]` with `_`.
///
/// Each character lowers to exactly one character (`İ` becomes `i`), so
/// the output has as many characters as the input.
#[must_use]
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .map(|c| if is_valid_id_char(c) { c } else { '_' })
        .collect()
}

/// Characters allowed in Terraform resource names.
const fn is_valid_id_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_')
}

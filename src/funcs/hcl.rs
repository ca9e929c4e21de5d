//! HCL encoding of configuration values.
//!
//! Mappings become a body of `key = value` attributes, sequences become
//! bracketed lists, and scalars become literals. Output is produced by the
//! `hcl-rs` formatter, then trimmed, so results can be concatenated straight
//! into a resource definition.
//!
//! Strings holding `${...}` or `%{...}` are emitted as templates, not as
//! escaped literals, so Terraform references kept in data files
//! (`"serviceAccount:${google_service_account.sa.email}"`) stay live.

use hcl::expr::TemplateExpr;
use hcl::{Attribute, Body, Expression, Identifier};
use serde_json::Value;

use super::Mapping;
use crate::core::{FuncError, Result};

/// Terminator used for multi-line description heredocs.
pub const HEREDOC_MARKER: &str = "EOF";

/// Encode `value` as HCL text with surrounding whitespace trimmed.
///
/// # Errors
///
/// Returns [`FuncError::HclEncode`] when the value cannot be represented in
/// HCL, for example a top-level mapping key that is not a valid attribute name.
///
/// # Examples
///
/// ```rust
/// use hclgen::funcs::encode;
/// use serde_json::json;
///
/// assert_eq!(encode(&json!(true)).unwrap(), "true");
/// assert_eq!(encode(&json!("us-east1")).unwrap(), "\"us-east1\"");
/// assert_eq!(encode(&json!("${var.region}")).unwrap(), "\"${var.region}\"");
/// assert_eq!(encode(&json!({"name": "demo"})).unwrap(), "name = \"demo\"");
/// ```
pub fn encode(value: &Value) -> Result<String> {
    let text = match value {
        Value::Object(m) => body(m).and_then(|body| hcl::format::to_string(&body)),
        _ => expression(value).and_then(|expr| hcl::format::to_string(&expr)),
    }
    .map_err(|source| FuncError::HclEncode {
        source,
    })?;

    Ok(text.trim().to_string())
}

/// Encode a single optional field as `key = <value>`.
///
/// Returns an empty string when `key` is absent so templates can emit
/// optional attributes unconditionally. Mapping values come out as object
/// expressions (`labels = { ... }`).
///
/// # Errors
///
/// Returns [`FuncError::HclEncode`] when `key` is not a valid attribute name
/// or the value cannot be encoded.
pub fn encode_field(m: &Mapping, key: &str) -> Result<String> {
    let Some(value) = m.get(key) else {
        return Ok(String::new());
    };

    let mut single = Mapping::new();
    single.insert(key.to_string(), value.clone());
    encode(&Value::Object(single))
}

fn body(m: &Mapping) -> hcl::Result<Body> {
    let attributes = m
        .iter()
        .map(|(key, value)| Ok(Attribute::new(Identifier::new(key.as_str())?, expression(value)?)))
        .collect::<hcl::Result<Vec<_>>>()?;
    Ok(Body::from(attributes))
}

fn expression(value: &Value) -> hcl::Result<Expression> {
    let mut expr = hcl::to_expression(value)?;
    keep_templates(&mut expr);
    Ok(expr)
}

/// Rewrite string literals containing template markers into quoted templates.
fn keep_templates(expr: &mut Expression) {
    match expr {
        Expression::String(s) if has_template_marker(s) => {
            let quoted = escape_quoted(s);
            *expr = Expression::TemplateExpr(Box::new(TemplateExpr::QuotedString(quoted)));
        }
        Expression::Array(items) => items.iter_mut().for_each(keep_templates),
        Expression::Object(object) => object.values_mut().for_each(keep_templates),
        _ => {}
    }
}

fn has_template_marker(s: &str) -> bool {
    s.contains("${") || s.contains("%{")
}

/// Escape quotes, backslashes and control characters, leaving template
/// markers alone.
fn escape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}

/// Quote a description for HCL.
///
/// Multi-line text becomes a heredoc; single-line text is wrapped in double
/// quotes as is. Embedded `"` characters are not escaped, so a single-line
/// description containing one yields invalid HCL.
#[must_use]
pub fn format_description(s: &str) -> String {
    if s.contains('\n') {
        format!("<<{HEREDOC_MARKER}\n{s}\n{HEREDOC_MARKER}")
    } else {
        format!("\"{s}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Strip all whitespace so assertions ignore layout.
    fn squash(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode(&json!(true)).unwrap(), "true");
        assert_eq!(encode(&json!(false)).unwrap(), "false");
        assert_eq!(encode(&json!(3)).unwrap(), "3");
        assert_eq!(encode(&json!(1.5)).unwrap(), "1.5");
        assert_eq!(encode(&json!(null)).unwrap(), "null");
        assert_eq!(encode(&json!("foo")).unwrap(), "\"foo\"");
    }

    #[test]
    fn test_encode_escapes_quotes_in_strings() {
        assert_eq!(encode(&json!("say \"hi\"")).unwrap(), r#""say \"hi\"""#);
    }

    #[test]
    fn test_encode_sequence() {
        let text = squash(&encode(&json!(["a", "b"])).unwrap());
        assert!(text.starts_with("[\"a\",\"b\""), "got {text}");
        assert!(text.ends_with(']'));
    }

    #[test]
    fn test_encode_mapping_as_attributes() {
        let text = encode(&json!({"count": 2, "name": "x"})).unwrap();
        assert_eq!(text.lines().count(), 2);
        let squashed = squash(&text);
        assert!(squashed.contains("count=2"));
        assert!(squashed.contains("name=\"x\""));
        assert_eq!(text, text.trim());
    }

    #[test]
    fn test_encode_nested_mapping() {
        let text = squash(&encode(&json!({"labels": {"env": "prod"}})).unwrap());
        assert!(text.starts_with("labels"));
        assert!(text.contains("env"));
        assert!(text.contains("\"prod\""));
    }

    #[test]
    fn test_encode_field_missing_is_empty() {
        let m = Mapping::new();
        assert_eq!(encode_field(&m, "force_destroy").unwrap(), "");
    }

    #[test]
    fn test_encode_field_present() {
        let m = json!({"force_destroy": true, "zones": ["a"]}).as_object().cloned().unwrap();
        assert_eq!(encode_field(&m, "force_destroy").unwrap(), "force_destroy = true");
        assert!(encode_field(&m, "zones").unwrap().starts_with("zones = ["));
    }

    #[test]
    fn test_encode_field_present_null() {
        let m = json!({"description": null}).as_object().cloned().unwrap();
        assert_eq!(encode_field(&m, "description").unwrap(), "description = null");
    }

    #[test]
    fn test_encode_field_mapping_is_object_expression() {
        let m = json!({"labels": {"env": "prod", "team": "core"}}).as_object().cloned().unwrap();
        let text = encode_field(&m, "labels").unwrap();

        assert!(text.starts_with("labels = {"), "got {text}");
        assert!(squash(&text).contains("\"env\"=\"prod\""));

        let body = hcl::parse(&text).unwrap();
        let attr = body.attributes().next().unwrap();
        assert_eq!(attr.key(), "labels");
        match attr.expr() {
            Expression::Object(object) => assert_eq!(object.len(), 2),
            other => panic!("expected object expression, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_field_nested_mapping() {
        let m = json!({"lifecycle": {"enabled": false, "rule": {"age": 30, "action": "Delete"}}})
            .as_object()
            .cloned()
            .unwrap();
        let text = encode_field(&m, "lifecycle").unwrap();

        let squashed = squash(&text);
        assert!(squashed.contains("\"age\"=30"), "got {text}");
        assert!(squashed.contains("\"action\"=\"Delete\""), "got {text}");

        let body = hcl::parse(&text).unwrap();
        assert_eq!(body.attributes().count(), 1);
    }

    #[test]
    fn test_encode_field_invalid_attribute_name() {
        let m = json!({"1abc": 1, "with space": 2}).as_object().cloned().unwrap();
        assert!(matches!(encode_field(&m, "1abc"), Err(FuncError::HclEncode { .. })));
        assert!(matches!(encode_field(&m, "with space"), Err(FuncError::HclEncode { .. })));
        assert!(matches!(encode(&json!({"1abc": 1})), Err(FuncError::HclEncode { .. })));
    }

    #[test]
    fn test_encode_keeps_interpolations_live() {
        assert_eq!(encode(&json!("${var.x}")).unwrap(), "\"${var.x}\"");
        assert_eq!(
            encode(&json!("serviceAccount:${google_service_account.sa.email}")).unwrap(),
            "\"serviceAccount:${google_service_account.sa.email}\""
        );
        assert_eq!(encode(&json!("%{ if var.on }on%{ endif }")).unwrap(), "\"%{ if var.on }on%{ endif }\"");
        assert_eq!(encode(&json!("cost $5 {x}")).unwrap(), "\"cost $5 {x}\"");
    }

    #[test]
    fn test_encode_interpolation_escapes_quotes() {
        assert_eq!(encode(&json!("a \"b\"\n${x}")).unwrap(), r#""a \"b\"\n${x}""#);
    }

    #[test]
    fn test_encode_field_interpolation_in_nested_values() {
        let m = json!({
            "members": ["serviceAccount:${google_service_account.sa.email}"],
            "labels": {"owner": "${var.owner}"}
        })
        .as_object()
        .cloned()
        .unwrap();

        let members = encode_field(&m, "members").unwrap();
        assert!(members.contains("\"serviceAccount:${google_service_account.sa.email}\""), "got {members}");
        assert!(!members.contains("$${"));

        let labels = encode_field(&m, "labels").unwrap();
        assert!(labels.contains("\"${var.owner}\""), "got {labels}");

        let body = hcl::parse(&labels).unwrap();
        let attr = body.attributes().next().unwrap();
        match attr.expr() {
            Expression::Object(object) => {
                let value = object.values().next().unwrap();
                assert!(matches!(value, Expression::TemplateExpr(_)), "got {value:?}");
            }
            other => panic!("expected object expression, got {other:?}"),
        }
    }

    #[test]
    fn test_format_description_single_line() {
        assert_eq!(format_description("A bucket"), "\"A bucket\"");
        assert_eq!(format_description(""), "\"\"");
    }

    #[test]
    fn test_format_description_keeps_embedded_quotes() {
        assert_eq!(format_description(r#"say "hi""#), r#""say "hi"""#);
    }

    #[test]
    fn test_format_description_multi_line_heredoc() {
        assert_eq!(format_description("line one\nline two"), "<<EOF\nline one\nline two\nEOF");
    }
}

//! Positional argument extraction with type checks.

use serde_json::Value;
use std::borrow::Cow;

use crate::core::{FuncError, Result};
use crate::funcs::{Mapping, kind_name};

/// Longest rendering of a single argument in error messages.
const MAX_ARG_DISPLAY: usize = 60;

fn arg<'a>(args: &'a [Value], index: usize, name: &str) -> Result<&'a Value> {
    args.get(index).ok_or_else(|| FuncError::InvalidArgument {
        message: format!("missing argument '{name}'"),
    })
}

fn mismatch(name: &str, expected: &'static str, found: &Value) -> FuncError {
    FuncError::TypeMismatch {
        context: format!("argument '{name}'"),
        expected,
        found: kind_name(found),
    }
}

/// A mapping argument. `null` counts as an empty mapping, which is how the
/// renderer passes context values that are not set.
pub(crate) fn mapping<'a>(args: &'a [Value], index: usize, name: &str) -> Result<Cow<'a, Mapping>> {
    match arg(args, index, name)? {
        Value::Object(m) => Ok(Cow::Borrowed(m)),
        Value::Null => Ok(Cow::Owned(Mapping::new())),
        other => Err(mismatch(name, "mapping", other)),
    }
}

pub(crate) fn string<'a>(args: &'a [Value], index: usize, name: &str) -> Result<&'a str> {
    let value = arg(args, index, name)?;
    value.as_str().ok_or_else(|| mismatch(name, "string", value))
}

pub(crate) fn integer(args: &[Value], index: usize, name: &str) -> Result<i64> {
    let value = arg(args, index, name)?;
    value.as_i64().ok_or_else(|| mismatch(name, "integer", value))
}

pub(crate) fn any<'a>(args: &'a [Value], index: usize, name: &str) -> Result<&'a Value> {
    arg(args, index, name)
}

/// Compact rendering of an argument list for error reports.
pub(crate) fn describe(args: &[Value]) -> String {
    args.iter()
        .map(|value| {
            let text = value.to_string();
            if text.chars().count() > MAX_ARG_DISPLAY {
                let head: String = text.chars().take(MAX_ARG_DISPLAY).collect();
                format!("{head}...")
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

//! String helpers exposed to templates.

use regex::Regex;
use serde_json::Value;

use crate::core::{FuncError, Result};

/// Substring of `s` starting at byte offset `start`, spanning `length` bytes.
///
/// A span running past the end is clamped to the end of `s`.
///
/// # Errors
///
/// Returns [`FuncError::RangeError`] when `start` is negative or not less than
/// `s.len()` (so `start == s.len()` is an error, not an empty result), when
/// `length` is negative, or when a bound would split a multi-byte character.
///
/// # Examples
///
/// ```rust
/// use hclgen::funcs::substr;
///
/// assert_eq!(substr("abcdef", 2, 10).unwrap(), "cdef");
/// assert!(substr("abcdef", 6, 1).is_err());
/// ```
pub fn substr(s: &str, start: i64, length: i64) -> Result<String> {
    let len = s.len();
    let begin = usize::try_from(start).ok().filter(|&b| b < len).ok_or(FuncError::RangeError {
        parameter: "start",
        value: start,
    })?;
    let span = usize::try_from(length).map_err(|_| FuncError::RangeError {
        parameter: "length",
        value: length,
    })?;
    let end = begin.saturating_add(span).min(len);

    if !s.is_char_boundary(begin) {
        return Err(FuncError::RangeError {
            parameter: "start",
            value: start,
        });
    }

    s.get(begin..end).map(str::to_string).ok_or(FuncError::RangeError {
        parameter: "length",
        value: length,
    })
}

/// Replace every non-overlapping occurrence of `old` in `s` with `new`.
#[must_use]
pub fn replace(s: &str, old: &str, new: &str) -> String {
    s.replace(old, new)
}

/// Replace every match of `pattern` in `s` with `repl`.
///
/// `repl` may reference capture groups as `$1`, `${1}` or `${name}`.
///
/// # Errors
///
/// Returns [`FuncError::PatternError`] if `pattern` does not compile.
///
/// # Examples
///
/// ```rust
/// use hclgen::funcs::regex_replace_all;
///
/// let out = regex_replace_all(r"(\w+)@(\w+)", "alice@corp", "${2}_${1}").unwrap();
/// assert_eq!(out, "corp_alice");
/// ```
pub fn regex_replace_all(pattern: &str, s: &str, repl: &str) -> Result<String> {
    let re = Regex::new(pattern).map_err(|source| FuncError::PatternError {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(re.replace_all(s, repl).into_owned())
}

/// Remove leading and trailing whitespace.
#[must_use]
pub fn trim_space(s: &str) -> String {
    s.trim().to_string()
}

/// Package the arguments as a sequence, unchanged.
#[must_use]
pub fn make_slice(args: &[Value]) -> Value {
    Value::Array(args.to_vec())
}

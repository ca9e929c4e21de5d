//! Data-manipulation primitives exposed to templates.
//!
//! Every function here takes borrowed [`Value`]s or [`Map`]s and never mutates
//! them: one merged configuration tree is shared read-only by every render that
//! uses it. Results are freshly allocated.
//!
//! # Modules
//!
//! - [`path`] - dotted-path lookup (`get`, `has`)
//! - [`merge`] - multi-source deep merge
//! - [`naming`] - resource identifier sanitization
//! - [`hcl`] - HCL encoding and description quoting
//! - [`json`] - JSON and escaped JSON text
//! - [`strings`] - substring, replace, regex replace, slices
//! - [`clock`] - injectable sources for timestamps and UUIDs
//!
//! Registry wiring lives in [`crate::registry`].

pub mod clock;
pub mod hcl;
pub mod json;
pub mod merge;
pub mod naming;
pub mod path;
pub mod strings;

use serde_json::Value;

pub use clock::{Clock, FixedClock, FixedIds, IdGenerator, RandomIds, SystemClock};
pub use hcl::{encode, encode_field, format_description};
pub use json::{to_escaped_json, to_json};
pub use merge::{deep_merge, merge};
pub use naming::resource_name;
pub use path::{get, has};
pub use strings::{make_slice, regex_replace_all, replace, substr, trim_space};

/// Configuration value flowing through every function.
pub type ConfigValue = Value;

/// String-keyed mapping of [`ConfigValue`]s.
pub type Mapping = serde_json::Map<String, Value>;

/// Short name of a value's variant, used in type mismatch errors.
#[must_use]
pub const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

//! The template function registry.
//!
//! [`FunctionRegistry`] is the single table binding symbolic names to the
//! primitives in [`crate::funcs`]. It is built once, never modified, and
//! shared by reference with every render; the renderer only looks names up
//! and calls them.
//!
//! # Calling conventions
//!
//! - [`FunctionRegistry::call`] takes positional arguments, as a text/template
//!   style renderer would pass them.
//! - [`FunctionRegistry::call_named`] takes named arguments, as Tera passes
//!   them. Names come from each entry's [`Signature`]; a variadic parameter
//!   takes a list.
//!
//! # Registered functions
//!
//! | Name | Parameters |
//! |------|------------|
//! | `get` | `m, key, default?` |
//! | `has` | `m, key` |
//! | `hcl` | `value` |
//! | `hclField` | `m, key` |
//! | `merge` | `sources...` |
//! | `replace` | `s, old, new` |
//! | `resourceName` | `m, key` |
//! | `now` | |
//! | `trimSpace` | `s` |
//! | `regexReplaceAll` | `regex, s, repl` |
//! | `makeSlice` | `args...` |
//! | `schemaDescription` | `s` |
//! | `substr` | `s, start, length` |
//! | `getEncodedJSON` | `m` |
//! | `getEncodedEscapedJSON` | `m` |
//! | `uuid` | |
//!
//! # Examples
//!
//! ```rust
//! use hclgen::registry::FunctionRegistry;
//! use serde_json::json;
//!
//! let registry = FunctionRegistry::default();
//! let name = registry
//!     .call("resourceName", &[json!({"name": "My Bucket"}), json!("name")])
//!     .unwrap();
//! assert_eq!(name, json!("my_bucket"));
//! ```

mod args;
mod builtins;

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::core::{CallError, FuncError, Result};
use crate::funcs::{Clock, IdGenerator, RandomIds, SystemClock, kind_name};

/// Implementation of a registered function over positional arguments.
pub type FuncImpl = fn(&CallContext<'_>, &[Value]) -> Result<Value>;

/// Non-deterministic sources available to a function call.
pub struct CallContext<'a> {
    /// Source of `now`
    pub clock: &'a dyn Clock,
    /// Source of `uuid`
    pub ids: &'a dyn IdGenerator,
}

/// How a parameter is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Must be supplied
    Required,
    /// May be omitted; at most one value
    Optional,
    /// Zero or more trailing values
    Variadic,
}

/// One named parameter of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Parameter name, used as the Tera keyword argument
    pub name: &'static str,
    /// Binding kind
    pub kind: ParamKind,
}

impl Param {
    /// A required parameter.
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Required,
        }
    }

    /// An optional parameter.
    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Optional,
        }
    }

    /// A variadic trailing parameter.
    #[must_use]
    pub const fn variadic(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Variadic,
        }
    }
}

/// Ordered parameter list of a function.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    /// Parameters in positional order
    pub params: &'static [Param],
}

impl Signature {
    fn count(&self, kind: ParamKind) -> usize {
        self.params.iter().filter(|p| p.kind == kind).count()
    }

    /// Fewest positional arguments accepted.
    #[must_use]
    pub fn min_args(&self) -> usize {
        self.count(ParamKind::Required)
    }

    /// Most positional arguments accepted, `None` when variadic.
    #[must_use]
    pub fn max_args(&self) -> Option<usize> {
        if self.count(ParamKind::Variadic) > 0 {
            None
        } else {
            Some(self.params.len())
        }
    }

    /// Check the number of positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FuncError::InvalidArgument`] when `count` is outside the
    /// accepted range. Supplying two defaults to `get` fails here.
    pub fn check_arity(&self, count: usize) -> Result<()> {
        let min = self.min_args();
        let too_many = self.max_args().is_some_and(|max| count > max);

        if count >= min && !too_many {
            return Ok(());
        }

        let expected = match self.max_args() {
            Some(max) if max == min => format!("{min}"),
            Some(max) => format!("{min} to {max}"),
            None => format!("at least {min}"),
        };
        Err(FuncError::InvalidArgument {
            message: format!("expected {expected} arguments, got {count}"),
        })
    }

    /// Arrange named arguments into positional order.
    ///
    /// A variadic parameter must be given as a list, whose items are spread
    /// into the positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FuncError::InvalidArgument`] for a missing required argument
    /// or an unknown name, and [`FuncError::TypeMismatch`] when a variadic
    /// argument is not a list.
    pub fn positional(&self, named: &HashMap<String, Value>) -> Result<Vec<Value>> {
        let mut unknown: Vec<&str> = named
            .keys()
            .map(String::as_str)
            .filter(|key| !self.params.iter().any(|p| p.name == *key))
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(FuncError::InvalidArgument {
                message: format!("unexpected argument(s): {}", unknown.join(", ")),
            });
        }

        let mut positional = Vec::with_capacity(named.len());
        for param in self.params {
            match (param.kind, named.get(param.name)) {
                (ParamKind::Required, None) => {
                    return Err(FuncError::InvalidArgument {
                        message: format!("missing argument '{}'", param.name),
                    });
                }
                (ParamKind::Variadic, Some(Value::Array(items))) => {
                    positional.extend(items.iter().cloned());
                }
                (ParamKind::Variadic, Some(other)) => {
                    return Err(FuncError::TypeMismatch {
                        context: format!("argument '{}'", param.name),
                        expected: "sequence",
                        found: kind_name(other),
                    });
                }
                (_, Some(value)) => positional.push(value.clone()),
                (_, None) => {}
            }
        }
        Ok(positional)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .params
            .iter()
            .map(|p| match p.kind {
                ParamKind::Required => p.name.to_string(),
                ParamKind::Optional => format!("{}?", p.name),
                ParamKind::Variadic => format!("{}...", p.name),
            })
            .collect();
        write!(f, "{}", rendered.join(", "))
    }
}

/// A registered function.
#[derive(Debug, Clone, Copy)]
pub struct FunctionEntry {
    /// Symbolic name used by templates
    pub name: &'static str,
    /// Parameter list
    pub signature: Signature,
    /// One-line description for listings
    pub summary: &'static str,
    /// The implementation
    pub func: FuncImpl,
}

/// Immutable table of template functions.
///
/// Cheap to share: wrap it in an [`Arc`] and hand clones to concurrent
/// renders.
pub struct FunctionRegistry {
    entries: BTreeMap<&'static str, &'static FunctionEntry>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl FunctionRegistry {
    /// Build the registry with the given time and identifier sources.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        let entries = builtins::BUILTINS.iter().map(|entry| (entry.name, entry)).collect();
        Self {
            entries,
            clock,
            ids,
        }
    }

    /// Registered entries, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = &'static FunctionEntry> + '_ {
        self.entries.values().copied()
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.entries.get(name).copied()
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no functions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call `name` with positional arguments.
    ///
    /// # Errors
    ///
    /// - [`CallError::UnknownFunction`] when nothing is registered as `name`
    /// - [`CallError::Failed`] when the arguments do not fit the signature or
    ///   the function itself fails; the error carries the function name and
    ///   the arguments
    pub fn call(&self, name: &str, args: &[Value]) -> std::result::Result<Value, CallError> {
        let entry = self.lookup(name)?;
        tracing::debug!("calling template function {}/{}", name, args.len());

        let ctx = CallContext {
            clock: self.clock.as_ref(),
            ids: self.ids.as_ref(),
        };
        entry
            .signature
            .check_arity(args.len())
            .and_then(|()| (entry.func)(&ctx, args))
            .map_err(|source| CallError::Failed {
                function: name.to_string(),
                args: args::describe(args),
                source,
            })
    }

    /// Call `name` with named arguments.
    ///
    /// # Errors
    ///
    /// As [`FunctionRegistry::call`], plus argument-binding failures from
    /// [`Signature::positional`].
    pub fn call_named(
        &self,
        name: &str,
        named: &HashMap<String, Value>,
    ) -> std::result::Result<Value, CallError> {
        let entry = self.lookup(name)?;
        let positional =
            entry.signature.positional(named).map_err(|source| CallError::Failed {
                function: name.to_string(),
                args: describe_named(named),
                source,
            })?;
        self.call(name, &positional)
    }

    fn lookup(&self, name: &str) -> std::result::Result<&'static FunctionEntry, CallError> {
        self.entries.get(name).copied().ok_or_else(|| CallError::UnknownFunction {
            name: name.to_string(),
        })
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomIds))
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry").field("functions", &self.entries.keys()).finish()
    }
}

fn describe_named(named: &HashMap<String, Value>) -> String {
    let mut keys: Vec<&String> = named.keys().collect();
    keys.sort();
    keys.iter()
        .map(|key| format!("{key}={}", args::describe(std::slice::from_ref(&named[*key]))))
        .collect::<Vec<_>>()
        .join(", ")
}

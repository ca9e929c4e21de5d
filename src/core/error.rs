//! Error handling for hclgen
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** for the template functions, so the renderer and
//!    library consumers can match on the failure kind
//! 2. **User-friendly messages** with actionable suggestions at the CLI edge
//!
//! # Architecture
//!
//! - [`FuncError`] - failure of a single template function (data-shape, pattern,
//!   range and encoding problems)
//! - [`CallError`] - failure of a registry call, carrying the function name and the
//!   arguments it was invoked with
//! - [`ErrorContext`] - wrapper that adds details and suggestions for terminal output
//!
//! Function failures are deterministic: the same data and template always fail the
//! same way, so nothing in this crate retries.
//!
//! # Examples
//!
//! ```rust,no_run
//! use hclgen::core::{FuncError, user_friendly_error};
//!
//! let err = FuncError::MissingField {
//!     fields: vec!["resource_name".to_string(), "name".to_string()],
//! };
//! user_friendly_error(anyhow::Error::from(err)).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Failure of a single template function.
///
/// Every variant is permanent for the render that produced it: the template
/// unit is aborted and the error is reported with its function context by
/// [`CallError`].
#[derive(Error, Debug)]
pub enum FuncError {
    /// A value was not of the shape the function needs.
    ///
    /// Raised when a dotted path walks through a non-mapping value, when a
    /// selected field is not a string, or when a positional argument has the
    /// wrong type.
    #[error("type mismatch at {context}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Where the mismatch was detected (a path prefix or an argument name)
        context: String,
        /// The expected shape, e.g. "mapping" or "string"
        expected: &'static str,
        /// The shape actually found
        found: &'static str,
    },

    /// None of the candidate keys were present and no fallback applies.
    #[error("map did not contain any of the keys {}", quoted_list(.fields))]
    MissingField {
        /// Candidate keys, in the order they were tried
        fields: Vec<String>,
    },

    /// A regular expression failed to compile.
    #[error("invalid regular expression '{pattern}'")]
    PatternError {
        /// The pattern as supplied by the template
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A string index or length was out of bounds.
    #[error("{parameter} parameter has an invalid value: {value}")]
    RangeError {
        /// The offending parameter ("start" or "length")
        parameter: &'static str,
        /// The value that was rejected
        value: i64,
    },

    /// A value could not be serialized to HCL.
    #[error("HCL encoding failed")]
    HclEncode {
        #[source]
        source: hcl::Error,
    },

    /// A value could not be serialized to JSON.
    #[error("JSON {stage} failed")]
    JsonEncode {
        /// Which step failed: "marshalling" or "escaping"
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The arguments did not fit the function's signature.
    #[error("invalid arguments: {message}")]
    InvalidArgument {
        /// Description of the arity or argument problem
        message: String,
    },
}

impl FuncError {
    /// True for the two encoding variants, which together form the
    /// "value cannot be serialized" error kind.
    #[must_use]
    pub const fn is_encode_error(&self) -> bool {
        matches!(self, Self::HclEncode { .. } | Self::JsonEncode { .. })
    }
}

fn quoted_list(fields: &[String]) -> String {
    fields.iter().map(|f| format!("\"{f}\"")).collect::<Vec<_>>().join(" nor ")
}

/// Failure of a named call through the function registry.
#[derive(Error, Debug)]
pub enum CallError {
    /// No function is registered under the requested name.
    #[error("unknown template function '{name}'")]
    UnknownFunction {
        /// The requested name
        name: String,
    },

    /// The function ran and failed.
    #[error("{function}({args}) failed: {source}")]
    Failed {
        /// Registry name of the function
        function: String,
        /// Compact rendering of the positional arguments
        args: String,
        #[source]
        source: FuncError,
    },
}

impl CallError {
    /// The underlying function error, if the function was found.
    #[must_use]
    pub const fn func_error(&self) -> Option<&FuncError> {
        match self {
            Self::Failed {
                source,
                ..
            } => Some(source),
            Self::UnknownFunction {
                ..
            } => None,
        }
    }
}

/// Error wrapper with user-facing details and suggestions.
///
/// Used by the binary to print errors in a consistent, colored format.
#[derive(Debug)]
pub struct ErrorContext {
    /// The headline error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with just a headline.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error (printed in green).
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error (printed in yellow).
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions for known kinds.
///
/// The full cause chain is appended to the message so the operator sees the
/// function name, its arguments and the data path that failed.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = with_cause_chain(&error);

    let func_error = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<FuncError>())
        .or_else(|| {
            error.chain().find_map(|cause| cause.downcast_ref::<CallError>()?.func_error())
        });

    if let Some(func_error) = func_error {
        return match func_error {
            FuncError::TypeMismatch {
                ..
            } => ErrorContext::new(message)
                .with_suggestion("Check the shape of the data at that path in your data files")
                .with_details("Dotted paths may only walk through mappings"),
            FuncError::MissingField {
                ..
            } => ErrorContext::new(message)
                .with_suggestion("Add one of the listed keys to the data passed to the function"),
            FuncError::PatternError {
                ..
            } => ErrorContext::new(message)
                .with_suggestion("Fix the regular expression syntax in the template"),
            FuncError::RangeError {
                ..
            } => ErrorContext::new(message)
                .with_details("substr requires 0 <= start < len(s) and length >= 0"),
            FuncError::HclEncode {
                ..
            }
            | FuncError::JsonEncode {
                ..
            } => ErrorContext::new(message)
                .with_details("The value contains something the target syntax cannot represent"),
            FuncError::InvalidArgument {
                ..
            } => ErrorContext::new(message)
                .with_suggestion("Run `hclgen functions` to list function signatures"),
        };
    }

    if error.chain().any(|cause| cause.downcast_ref::<CallError>().is_some()) {
        return ErrorContext::new(message)
            .with_suggestion("Run `hclgen functions` to list the available functions");
    }

    if error.chain().any(|cause| cause.downcast_ref::<toml::de::Error>().is_some()) {
        return ErrorContext::new(message)
            .with_suggestion("Check the TOML syntax of the file. Verify quotes, brackets, and indentation");
    }

    ErrorContext::new(message)
}

fn with_cause_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

//! Core types shared by every part of hclgen.
//!
//! # Modules
//!
//! ## `error` - Error Handling
//!
//! - [`FuncError`] - failure kinds of individual template functions
//! - [`CallError`] - registry call failures with function name and arguments
//! - [`ErrorContext`] - user-friendly wrapper with suggestions for CLI output
//! - [`user_friendly_error`] - convert any error into an [`ErrorContext`]
//!
//! Library code returns these typed errors; the binary wraps them with
//! `anyhow` context chains before printing.

pub mod error;

pub use error::{CallError, ErrorContext, FuncError, user_friendly_error};

/// Result alias for template function operations.
pub type Result<T> = std::result::Result<T, FuncError>;

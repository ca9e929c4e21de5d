//! hclgen - template functions for rendering HCL resource definitions
//!
//! hclgen turns a hierarchical, merged configuration tree (mappings of
//! scalars, sequences and nested mappings) into declarative
//! infrastructure-as-code resource blocks. The heart of the crate is a
//! registry of data-manipulation functions exposed to a template engine:
//! dotted-path lookup, multi-source deep merge, HCL encoding, identifier
//! sanitization and string/JSON utilities.
//!
//! # Architecture Overview
//!
//! - Data files are loaded and deep-merged, last file wins, into one mapping
//! - Templates are rendered with Tera against that mapping
//! - Every registry function is available inside templates by name
//! - Function failures abort the render and carry the function name, its
//!   arguments and the path that failed
//!
//! # Core Modules
//!
//! - [`funcs`] - the operations themselves: path lookup, merge, naming, HCL
//!   and JSON encoding, string utilities, clock and id sources
//! - [`registry`] - immutable name → function table with signatures
//! - [`templating`] - Tera adapter that registers the registry's functions
//! - [`config`] - `hclgen.toml` settings and data file loading
//! - [`core`] - error types and user-facing error formatting
//! - [`cli`] - the `hclgen` command-line interface
//!
//! # Template Example
//!
//! ```text
//! resource "google_storage_bucket" "{{ resourceName(m=bucket, key="name") }}" {
//!   {{ hclField(m=bucket, key="location") }}
//!   {{ hclField(m=bucket, key="force_destroy") }}
//!   {{ hclField(m=bucket, key="labels") }}
//!   {% if has(m=bucket, key="description") %}description = {{ schemaDescription(s=bucket.description) }}{% endif %}
//! }
//! ```
//!
//! # Library Example
//!
//! ```rust,no_run
//! use hclgen::funcs::{Mapping, merge};
//! use hclgen::templating::TemplateRenderer;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let defaults: Mapping = serde_json::from_value(json!({"bucket": {"location": "EU"}}))?;
//! let prod: Mapping = serde_json::from_value(json!({"bucket": {"name": "Logs"}}))?;
//! let data = merge([&defaults, &prod]);
//!
//! let renderer = TemplateRenderer::default();
//! let hcl = renderer.render_str(
//!     r#"name = "{{ resourceName(m=bucket, key="name") }}""#,
//!     &data,
//! )?;
//! assert_eq!(hcl, r#"name = "logs""#);
//! # Ok(())
//! # }
//! ```
//!
//! # Command Line
//!
//! ```bash
//! # Render against merged data files (later files win)
//! hclgen render bucket.tf.tmpl --data defaults.yaml --data prod.yaml
//!
//! # List functions and their parameters
//! hclgen functions
//! ```

// Function library
pub mod funcs;
pub mod registry;

// Rendering and surfaces
pub mod cli;
pub mod config;
pub mod core;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

//! Tera integration for the hclgen function library.
//!
//! Templates are rendered with Tera; every registry function is available
//! under its registry name and takes keyword arguments named after its
//! parameters.
//!
//! # Examples
//!
//! ```text
//! resource "google_storage_bucket" "{{ resourceName(m=bucket, key="name") }}" {
//!   name = "{{ bucket.name }}"
//!   {{ hclField(m=bucket, key="labels") }}
//!   description = {{ schemaDescription(s=bucket.description) }}
//! }
//! ```
//!
//! Variadic functions take a list: `{{ merge(sources=[defaults, bucket]) }}`.

pub mod error;
pub mod renderer;

pub use error::TemplateError;
pub use renderer::{INLINE_TEMPLATE_NAME, TemplateRenderer};

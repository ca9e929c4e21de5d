//! Integration test suite for hclgen
//!
//! End-to-end tests for template rendering through the public API and for the
//! `hclgen` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: `hclgen render` and `hclgen functions` against temporary projects
//! - **templating**: resource templates rendered with the full function set

mod cli;
mod templating;

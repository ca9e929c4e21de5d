//! Test utilities for hclgen
//!
//! Helpers shared by unit and integration tests:
//! - once-only tracing setup that writes through the test harness
//! - a registry with a fixed clock and fixed UUIDs, so `now` and `uuid`
//!   render deterministically
//! - [`TestProject`], a temporary directory for template, data and config files
//!
//! # Example
//!
//! ```rust,no_run
//! use hclgen::test_utils::{TestProject, fixed_registry};
//!
//! let project = TestProject::new().unwrap();
//! project.write("data.yaml", "name: web\n").unwrap();
//! let registry = fixed_registry();
//! assert!(registry.get("uuid").is_some());
//! ```

pub mod fixtures;

pub use fixtures::{FIXED_NOW, FIXED_UUID, TestProject, fixed_registry, sample_service};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=hclgen=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

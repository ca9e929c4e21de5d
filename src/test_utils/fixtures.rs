//! Fixtures for registry, renderer and CLI tests.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

use crate::funcs::{FixedClock, FixedIds, Mapping};
use crate::registry::FunctionRegistry;

/// RFC 3339 text produced by `now` under [`fixed_registry`].
pub const FIXED_NOW: &str = "2024-01-02T03:04:05Z";

/// Text produced by `uuid` under [`fixed_registry`].
pub const FIXED_UUID: &str = "6f9619ff-8b86-4d01-b42d-00cf4fc964ff";

fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single().unwrap_or_default()
}

/// A registry whose `now` and `uuid` always return [`FIXED_NOW`] and [`FIXED_UUID`].
#[must_use]
pub fn fixed_registry() -> FunctionRegistry {
    let id = Uuid::parse_str(FIXED_UUID).unwrap_or_default();
    FunctionRegistry::new(Arc::new(FixedClock(fixed_instant())), Arc::new(FixedIds(id)))
}

/// A merged service definition in the shape resource templates usually see.
#[must_use]
pub fn sample_service() -> Mapping {
    let value = json!({
        "name": "My Service!",
        "labels": { "team": "core", "tier": "backend" },
        "storage": {
            "force_destroy": true,
            "location": "EU",
            "versioning": { "enabled": false }
        },
        "zones": ["a", "b"],
        "description": "Primary API service"
    });
    match value {
        serde_json::Value::Object(map) => map,
        _ => Mapping::new(),
    }
}

/// Temporary project directory holding templates, data and config files.
///
/// The directory is removed when the value is dropped.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create an empty project directory.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp directory")?;
        Ok(Self {
            dir,
        })
    }

    /// Root of the project.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the project.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) -> Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read a file from the project.
    pub fn read(&self, relative: impl AsRef<Path>) -> Result<String> {
        let path = self.join(relative);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

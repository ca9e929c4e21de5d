//! Configuration for the `hclgen` binary.
//!
//! Settings live in an optional `hclgen.toml`; command-line flags override
//! them. Data files listed here are loaded and deep-merged in order to build
//! the tree templates are rendered against.
//!
//! # File Format
//!
//! ```toml
//! # Merged left to right; later files win
//! data = ["defaults.yaml", "envs/prod.yaml"]
//!
//! # Write rendered output here instead of stdout
//! output = "main.tf"
//!
//! # tracing filter, e.g. "debug" or "hclgen=trace"
//! log_level = "info"
//! ```
//!
//! Relative paths are resolved against the directory containing the file.

pub mod data;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use data::{load_data_file, load_merged_data};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hclgen.toml";

/// Settings for a render run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Data files merged, in order, into the render context.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<PathBuf>,

    /// Output file; stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Log filter used when no verbosity flag is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl RenderConfig {
    /// Load configuration from `path`, resolving relative paths against its
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Load from `path` if given, else from [`DEFAULT_CONFIG_FILE`] if it
    /// exists, else defaults.
    ///
    /// An explicitly given path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected file cannot be loaded.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load_from(default)
                } else {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for file in &mut self.data {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
        if let Some(output) = &mut self.output
            && output.is_relative()
        {
            *output = base.join(&*output);
        }
    }
}

//! Loading data files into configuration mappings.
//!
//! Each file must hold a mapping at its root. The format is chosen by
//! extension: `.yaml`/`.yml`, `.json` or `.toml`.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::Path;

use crate::funcs::{Mapping, kind_name, merge};

/// Load one data file as a mapping.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported
/// extension, fails to parse, or does not contain a mapping at its root.
pub fn load_data_file(path: &Path) -> Result<Mapping> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;

    let extension =
        path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase).unwrap_or_default();

    let value: Value = match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML data file {}", path.display()))?,
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON data file {}", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML data file {}", path.display()))?,
        _ => bail!(
            "Unsupported data file extension for {}. Allowed extensions: yaml, yml, json, toml",
            path.display()
        ),
    };

    match value {
        Value::Object(map) => Ok(map),
        // An empty YAML document parses as null.
        Value::Null => Ok(Mapping::new()),
        other => bail!(
            "Data file {} must contain a mapping at its root, found {}",
            path.display(),
            kind_name(&other)
        ),
    }
}

/// Load `paths` in order and deep-merge them, later files winning.
///
/// # Errors
///
/// Returns the first load error encountered.
pub fn load_merged_data(paths: &[impl AsRef<Path>]) -> Result<Mapping> {
    let sources =
        paths.iter().map(|path| load_data_file(path.as_ref())).collect::<Result<Vec<_>>>()?;
    tracing::debug!("Merging {} data file(s)", sources.len());
    Ok(merge(&sources))
}

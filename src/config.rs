//! Configuration file support for asset-sweep.
//!
//! Provides YAML-based configuration through `asset-sweep.config.yml`
//! files, including data structures, file loading, and validation.
//! Command-line flags always take precedence over config values.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;

const CONFIG_FILENAME: &str = "asset-sweep.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub exclude_assets: Option<Vec<String>>,
    pub exclude_paths: Option<Vec<String>>,
    pub exclude_classes: Option<Vec<String>>,
    pub chunk_limit: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(limit) = config.chunk_limit {
        if limit == 0 {
            bail!(
                "Invalid config: chunk_limit must be at least 1.\n\n\
                 💡 Hint: chunk_limit bounds how many assets a fallback deletion round may attempt."
            );
        }
    }

    for (field, entries) in [
        ("exclude_assets", &config.exclude_assets),
        ("exclude_paths", &config.exclude_paths),
        ("exclude_classes", &config.exclude_classes),
    ] {
        if let Some(entries) = entries {
            for (i, entry) in entries.iter().enumerate() {
                if entry.trim().is_empty() {
                    bail!(
                        "Invalid config: {}[{}] must not be empty.\n\n\
                         💡 Hint: Each exclusion entry must name an asset id, path prefix or class.",
                        field,
                        i
                    );
                }
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

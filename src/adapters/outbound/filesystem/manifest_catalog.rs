use crate::cleaning::domain::{AssetClass, AssetId, AssetRecord};
use crate::ports::outbound::AssetCatalog;
use crate::shared::error::CleanerError;
use crate::shared::security::safe_read_to_string;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// File name of the asset manifest inside the content root
pub const MANIFEST_FILENAME: &str = "asset-manifest.toml";

/// One `[[asset]]` entry of the manifest file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ManifestAsset {
    id: String,
    class: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    depends_on: Vec<String>,
}

/// Top-level manifest file schema
#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    asset: Vec<ManifestAsset>,
}

/// ManifestCatalog adapter reading asset metadata from a TOML manifest
///
/// This adapter implements the AssetCatalog port on top of an
/// `asset-manifest.toml` file in the content root. The manifest declares
/// forward (depends-on) edges only; referencer edges are derived by
/// inverting them, so both edge directions reach the core pre-populated.
pub struct ManifestCatalog {
    root: PathBuf,
}

impl ManifestCatalog {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILENAME)
    }

    /// Reads and parses the manifest, deriving referencer edges
    fn load(&self) -> Result<Vec<AssetRecord>> {
        let manifest_path = self.manifest_path();

        if !manifest_path.exists() {
            return Err(CleanerError::ManifestNotFound {
                path: manifest_path,
                suggestion: format!(
                    "Export an {} from your content tool into the content root, or pass a different directory with --path",
                    MANIFEST_FILENAME
                ),
            }
            .into());
        }

        let content = safe_read_to_string(&manifest_path, "asset manifest")?;
        let manifest: ManifestFile =
            toml::from_str(&content).map_err(|e| CleanerError::ManifestParseError {
                path: manifest_path.clone(),
                details: e.to_string(),
            })?;

        let mut parsed: Vec<(AssetId, u64, AssetClass, Vec<AssetId>)> =
            Vec::with_capacity(manifest.asset.len());
        for entry in manifest.asset {
            let id = AssetId::new(entry.id).map_err(|e| CleanerError::ManifestParseError {
                path: manifest_path.clone(),
                details: e.to_string(),
            })?;
            let class =
                AssetClass::new(entry.class).map_err(|e| CleanerError::ManifestParseError {
                    path: manifest_path.clone(),
                    details: e.to_string(),
                })?;
            let mut depends_on = Vec::with_capacity(entry.depends_on.len());
            for dep in entry.depends_on {
                depends_on.push(AssetId::new(dep).map_err(|e| {
                    CleanerError::ManifestParseError {
                        path: manifest_path.clone(),
                        details: e.to_string(),
                    }
                })?);
            }
            parsed.push((id, entry.size, class, depends_on));
        }

        // invert forward edges once so records carry both directions
        let mut referencers: HashMap<AssetId, Vec<AssetId>> = HashMap::new();
        for (id, _, _, depends_on) in &parsed {
            for dep in depends_on {
                referencers.entry(dep.clone()).or_default().push(id.clone());
            }
        }

        Ok(parsed
            .into_iter()
            .map(|(id, size, class, depends_on)| {
                let mut depended_on_by = referencers.remove(&id).unwrap_or_default();
                depended_on_by.sort();
                AssetRecord::new(id, size, class, depends_on, depended_on_by)
            })
            .collect())
    }
}

impl AssetCatalog for ManifestCatalog {
    fn all_asset_records(&self) -> Result<Vec<AssetRecord>> {
        self.load()
    }

    fn assets_under_path(&self, path: &str) -> Result<Vec<AssetId>> {
        Ok(self
            .load()?
            .into_iter()
            .map(|record| record.id().clone())
            .filter(|id| id.is_under_path(path))
            .collect())
    }
}

use asset_sweep::prelude::*;
use std::collections::HashMap;

/// Mock AssetCatalog for testing
///
/// Assets are declared with forward dependencies only; referencer edges
/// are derived by inversion, the same contract the filesystem catalog
/// provides.
pub struct MockAssetCatalog {
    assets: Vec<(String, String, u64, Vec<String>)>,
    pub should_fail: bool,
}

impl MockAssetCatalog {
    pub fn new() -> Self {
        Self {
            assets: Vec::new(),
            should_fail: false,
        }
    }

    pub fn with_asset(mut self, id: &str, class: &str, size: u64, depends_on: &[&str]) -> Self {
        self.assets.push((
            id.to_string(),
            class.to_string(),
            size,
            depends_on.iter().map(|d| d.to_string()).collect(),
        ));
        self
    }

    pub fn with_failure() -> Self {
        Self {
            assets: Vec::new(),
            should_fail: true,
        }
    }
}

impl Default for MockAssetCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetCatalog for MockAssetCatalog {
    fn all_asset_records(&self) -> Result<Vec<AssetRecord>> {
        if self.should_fail {
            anyhow::bail!("Mock catalog failure");
        }

        let mut referencers: HashMap<String, Vec<String>> = HashMap::new();
        for (id, _, _, depends_on) in &self.assets {
            for dep in depends_on {
                referencers.entry(dep.clone()).or_default().push(id.clone());
            }
        }

        self.assets
            .iter()
            .map(|(id, class, size, depends_on)| {
                let depends_on = depends_on
                    .iter()
                    .map(|d| AssetId::new(d.clone()))
                    .collect::<Result<Vec<_>>>()?;
                let depended_on_by = referencers
                    .get(id)
                    .map(|ids| ids.iter().map(|r| AssetId::new(r.clone())).collect())
                    .unwrap_or_else(|| Ok(Vec::new()))?;
                Ok(AssetRecord::new(
                    AssetId::new(id.clone())?,
                    *size,
                    AssetClass::new(class.clone())?,
                    depends_on,
                    depended_on_by,
                ))
            })
            .collect()
    }

    fn assets_under_path(&self, path: &str) -> Result<Vec<AssetId>> {
        if self.should_fail {
            anyhow::bail!("Mock catalog failure");
        }

        self.assets
            .iter()
            .map(|(id, _, _, _)| AssetId::new(id.clone()))
            .collect::<Result<Vec<_>>>()
            .map(|ids| ids.into_iter().filter(|id| id.is_under_path(path)).collect())
    }
}

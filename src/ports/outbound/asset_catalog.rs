use crate::cleaning::domain::{AssetId, AssetRecord};
use crate::shared::Result;

/// AssetCatalog port for reading asset metadata
///
/// This port abstracts the external asset-metadata catalog that supplies
/// the candidate pool: every asset's identity, size, class and declared
/// dependency/referencer edges.
pub trait AssetCatalog {
    /// Reads every candidate asset record in one batch.
    ///
    /// The core calls this once per scan and never re-queries edges per
    /// node.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be read or parsed.
    fn all_asset_records(&self) -> Result<Vec<AssetRecord>>;

    /// Lists the ids of all assets under the given path prefix.
    ///
    /// Used to resolve path-based exclusion rules to concrete asset ids.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be read or parsed.
    fn assets_under_path(&self, path: &str) -> Result<Vec<AssetId>>;
}

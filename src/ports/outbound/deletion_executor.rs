use crate::cleaning::domain::AssetId;
use crate::shared::Result;
use std::collections::BTreeSet;

/// DeletionExecutor port for physically removing assets
///
/// This is the only collaborator with an externally visible side effect.
pub trait DeletionExecutor {
    /// Requests deletion of the given assets and returns the subset that
    /// was actually removed.
    ///
    /// The result may be a strict subset: the executor may refuse
    /// individual assets (locked, still referenced outside the pool at the
    /// moment of deletion). It must never remove an asset that was not
    /// requested. Per-asset refusals are not errors.
    ///
    /// # Errors
    /// Returns an error only for whole-request failures (I/O, permissions
    /// on the storage root); such failures are reported upward unmodified.
    fn delete(&self, ids: &BTreeSet<AssetId>) -> Result<BTreeSet<AssetId>>;
}

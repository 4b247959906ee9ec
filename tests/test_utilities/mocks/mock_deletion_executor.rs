use asset_sweep::prelude::*;
use std::collections::BTreeSet;
use std::sync::Mutex;

/// Mock DeletionExecutor for testing that records every requested batch
///
/// Assets in `refused` are reported as not deleted; everything else is
/// confirmed. `refuse_once` refusals are consumed by the first batch that
/// requests them, modelling a transient lock.
pub struct MockDeletionExecutor {
    pub batches: Mutex<Vec<BTreeSet<AssetId>>>,
    refused: BTreeSet<AssetId>,
    refuse_once: Mutex<BTreeSet<AssetId>>,
    pub should_fail: bool,
}

impl MockDeletionExecutor {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            refused: BTreeSet::new(),
            refuse_once: Mutex::new(BTreeSet::new()),
            should_fail: false,
        }
    }

    pub fn with_refused(mut self, ids: &[&str]) -> Self {
        self.refused = ids
            .iter()
            .map(|id| AssetId::new(id.to_string()).unwrap())
            .collect();
        self
    }

    pub fn with_refused_once(self, ids: &[&str]) -> Self {
        *self.refuse_once.lock().unwrap() = ids
            .iter()
            .map(|id| AssetId::new(id.to_string()).unwrap())
            .collect();
        self
    }

    pub fn with_failure() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            refused: BTreeSet::new(),
            refuse_once: Mutex::new(BTreeSet::new()),
            should_fail: true,
        }
    }

    pub fn requested_batches(&self) -> Vec<BTreeSet<AssetId>> {
        self.batches.lock().unwrap().clone()
    }
}

impl Default for MockDeletionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl DeletionExecutor for MockDeletionExecutor {
    fn delete(&self, ids: &BTreeSet<AssetId>) -> Result<BTreeSet<AssetId>> {
        if self.should_fail {
            anyhow::bail!("Mock deletion failure");
        }

        self.batches.lock().unwrap().push(ids.clone());

        let mut once = self.refuse_once.lock().unwrap();
        let confirmed: BTreeSet<AssetId> = ids
            .iter()
            .filter(|id| !self.refused.contains(id) && !once.contains(id))
            .cloned()
            .collect();
        once.retain(|id| !ids.contains(id));

        Ok(confirmed)
    }
}

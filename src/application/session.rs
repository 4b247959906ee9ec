use crate::application::dto::{AssetView, CleaningStats, ScanMetadata, SweepReport};
use crate::cleaning::domain::{
    AssetId, AssetRecord, ExclusionPolicy, ExclusionSet, GraphNode, RelationalMap,
};
use crate::cleaning::services::{
    DeletionOutcome, DeletionSequencer, ExclusionPropagator, RoundProgress, DEFAULT_CHUNK_LIMIT,
};
use crate::ports::outbound::{AssetCatalog, DeletionExecutor};
use crate::shared::error::CleanerError;
use crate::shared::Result;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::AtomicBool;

/// CleanerSession - stateful facade over one scan of the candidate pool
///
/// Holds the catalog snapshot, the exclusion state and the relational map,
/// and exposes the read-only views the presentation layer consumes. All
/// derived structures are rebuilt from scratch (never patched) after the
/// initial scan, after exclusion changes and after each deletion run; a
/// new scan discards everything.
#[derive(Debug)]
pub struct CleanerSession {
    records: HashMap<AssetId, AssetRecord>,
    /// Full candidate set from the catalog, shrinking only on deletion
    candidates: BTreeSet<AssetId>,
    policy: ExclusionPolicy,
    /// Policy resolved to concrete ids (exact + path + class matches)
    explicit: BTreeSet<AssetId>,
    exclusions: ExclusionSet,
    /// Deletable pool: candidates minus excluded and linked
    pool: BTreeSet<AssetId>,
    map: RelationalMap,
    chunk_limit: usize,
    deleted_total: usize,
}

impl CleanerSession {
    /// Scans the catalog and builds the session state.
    ///
    /// Reads every asset record in one batch, resolves the exclusion
    /// policy against the catalog, and builds the relational map over the
    /// resulting deletable pool.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be read, contains duplicate
    /// ids, or the pool references a missing record.
    pub fn scan<C: AssetCatalog>(catalog: &C, policy: ExclusionPolicy) -> Result<Self> {
        let mut records: HashMap<AssetId, AssetRecord> = HashMap::new();
        for record in catalog.all_asset_records()? {
            let id = record.id().clone();
            if records.insert(id.clone(), record).is_some() {
                return Err(CleanerError::Validation {
                    message: format!("Catalog contains duplicate asset id '{}'", id),
                }
                .into());
            }
        }
        let candidates: BTreeSet<AssetId> = records.keys().cloned().collect();

        let mut session = Self {
            records,
            candidates,
            policy: ExclusionPolicy::default(),
            explicit: BTreeSet::new(),
            exclusions: ExclusionSet::empty(),
            pool: BTreeSet::new(),
            map: RelationalMap::empty(),
            chunk_limit: DEFAULT_CHUNK_LIMIT,
            deleted_total: 0,
        };
        session.set_explicit_exclusions(catalog, policy)?;
        Ok(session)
    }

    /// Overrides the fallback chunk limit used by the deletion loop
    pub fn with_chunk_limit(mut self, chunk_limit: usize) -> Self {
        self.chunk_limit = chunk_limit.max(1);
        self
    }

    /// Replaces the exclusion policy and rebuilds the exclusion set, pool
    /// and relational map.
    ///
    /// Passing a policy with entries removed is how previously excluded
    /// assets are included back; an empty policy includes everything.
    pub fn set_explicit_exclusions<C: AssetCatalog>(
        &mut self,
        catalog: &C,
        policy: ExclusionPolicy,
    ) -> Result<()> {
        self.explicit = self.resolve_policy(catalog, &policy)?;
        self.policy = policy;
        self.rebuild()
    }

    /// Drops every exclusion rule and rebuilds
    pub fn clear_exclusions(&mut self) -> Result<()> {
        self.policy = ExclusionPolicy::default();
        self.explicit = BTreeSet::new();
        self.rebuild()
    }

    /// Read-only snapshot of the current relational map
    pub fn relational_map(&self) -> &RelationalMap {
        &self.map
    }

    /// Deletable assets with no in-pool referencers, in id order
    pub fn root_nodes(&self) -> Vec<&GraphNode> {
        self.map.root_nodes()
    }

    /// Deletable assets on in-pool dependency cycles, in id order
    pub fn circular_nodes(&self) -> Vec<&GraphNode> {
        self.map.circular_nodes()
    }

    /// Deletable assets with no in-pool dependencies, in id order
    pub fn leaf_nodes(&self) -> Vec<&GraphNode> {
        self.map.leaf_nodes()
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn policy(&self) -> &ExclusionPolicy {
        &self.policy
    }

    /// The current deletable pool, in id order
    pub fn pool(&self) -> &BTreeSet<AssetId> {
        &self.pool
    }

    pub fn deleted_total(&self) -> usize {
        self.deleted_total
    }

    /// Runs the deletion loop over the current pool.
    ///
    /// Confirmed-deleted assets leave the candidate set; everything is
    /// rebuilt afterwards so the session reflects the post-deletion state.
    /// `cancel` is honored between rounds only.
    ///
    /// # Errors
    /// Propagates [`CleanerError::NoProgress`] and
    /// [`CleanerError::MissingRecord`] from the sequencer. Assets that
    /// earlier rounds already removed stay committed even when a later
    /// round fails: the session never lists a physically deleted asset
    /// as unused.
    pub fn run_deletion_loop<D: DeletionExecutor>(
        &mut self,
        executor: &D,
        cancel: Option<&AtomicBool>,
        on_round: impl FnMut(&RoundProgress),
    ) -> Result<DeletionOutcome> {
        let sequencer = DeletionSequencer::new(executor).with_chunk_limit(self.chunk_limit);
        let outcome = match sequencer.run(self.pool.clone(), &self.records, cancel, on_round) {
            Ok(outcome) => outcome,
            Err(err) => {
                // a terminal NoProgress carries the residual pool; commit
                // what earlier rounds confirmed before surfacing the error
                if let Some(CleanerError::NoProgress { remaining }) =
                    err.downcast_ref::<CleanerError>()
                {
                    let residual: BTreeSet<AssetId> = self
                        .pool
                        .iter()
                        .filter(|id| remaining.contains(&id.to_string()))
                        .cloned()
                        .collect();
                    self.commit_deleted(&residual)?;
                }
                return Err(err);
            }
        };

        self.commit_deleted(&outcome.remaining)?;
        Ok(outcome)
    }

    /// Removes every pool asset not in `remaining` from the candidate set
    /// and rebuilds the derived structures
    fn commit_deleted(&mut self, remaining: &BTreeSet<AssetId>) -> Result<()> {
        let deleted: BTreeSet<AssetId> = self.pool.difference(remaining).cloned().collect();
        for id in &deleted {
            self.candidates.remove(id);
            self.records.remove(id);
        }
        self.deleted_total += deleted.len();
        self.rebuild()
    }

    /// Builds the report read model for the current state
    pub fn report(&self) -> SweepReport {
        let views = |nodes: Vec<&GraphNode>| -> Vec<AssetView> {
            nodes
                .into_iter()
                .map(|node| AssetView::from_node(node, &self.records[node.id()]))
                .collect()
        };
        let protected_views = |ids: &BTreeSet<AssetId>, kind: &str| -> Vec<AssetView> {
            ids.iter()
                .filter_map(|id| self.records.get(id))
                .map(|record| AssetView::from_record(record, kind))
                .collect()
        };

        SweepReport {
            metadata: ScanMetadata::generate(),
            stats: self.stats(),
            roots: views(self.root_nodes()),
            leaves: views(self.leaf_nodes()),
            circulars: views(self.circular_nodes()),
            excluded: protected_views(self.exclusions.excluded(), "excluded"),
            linked: protected_views(self.exclusions.linked(), "linked"),
        }
    }

    /// Aggregate counters over the current state
    pub fn stats(&self) -> CleaningStats {
        let unused_total_size_bytes = self
            .pool
            .iter()
            .filter_map(|id| self.records.get(id))
            .map(|record| record.size_bytes())
            .sum();

        CleaningStats {
            unused_assets: self.pool.len(),
            unused_total_size_bytes,
            root_assets: self.map.root_nodes().len(),
            leaf_assets: self.map.leaf_nodes().len(),
            circular_assets: self.map.circular_nodes().len(),
            excluded_assets: self.exclusions.excluded().len(),
            linked_assets: self.exclusions.linked().len(),
            deleted_assets: self.deleted_total,
        }
    }

    /// Resolves the policy's exact/path/class rules to concrete ids
    fn resolve_policy<C: AssetCatalog>(
        &self,
        catalog: &C,
        policy: &ExclusionPolicy,
    ) -> Result<BTreeSet<AssetId>> {
        let mut explicit: BTreeSet<AssetId> = policy.assets.clone();

        for path in &policy.paths {
            explicit.extend(catalog.assets_under_path(path)?);
        }

        if !policy.classes.is_empty() {
            explicit.extend(
                self.records
                    .values()
                    .filter(|record| policy.classes.contains(record.class()))
                    .map(|record| record.id().clone()),
            );
        }

        Ok(explicit)
    }

    /// Rebuilds exclusion set, pool and relational map from scratch.
    ///
    /// Propagation runs over the full candidate map so that linked assets
    /// are found even when a previous rebuild had already removed them
    /// from the deletable pool.
    fn rebuild(&mut self) -> Result<()> {
        let candidate_map = RelationalMap::build(&self.candidates, &self.records)?;
        self.exclusions = ExclusionPropagator::propagate(&candidate_map, &self.explicit);

        self.pool = self
            .candidates
            .iter()
            .filter(|id| !self.exclusions.is_protected(id))
            .cloned()
            .collect();
        self.map = RelationalMap::build(&self.pool, &self.records)?;
        Ok(())
    }
}

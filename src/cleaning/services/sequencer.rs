use crate::cleaning::domain::{AssetId, AssetRecord, RelationalMap};
use crate::ports::outbound::DeletionExecutor;
use crate::shared::error::CleanerError;
use crate::shared::Result;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

/// Fallback batch size when the graph has neither roots nor circular
/// components. That state is reachable only from inconsistent catalog
/// data; a non-empty consistent dependency graph always has one or the
/// other.
pub const DEFAULT_CHUNK_LIMIT: usize = 32;

/// Per-round progress snapshot handed to the progress callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundProgress {
    /// 1-based round number
    pub round: usize,
    /// Number of assets requested for deletion this round
    pub batch_size: usize,
    /// Number of assets confirmed deleted this round
    pub deleted_in_round: usize,
    /// Running total of confirmed deletions
    pub deleted_total: usize,
    /// Pool size after this round
    pub remaining: usize,
}

/// Result of a completed (or cancelled) deletion loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    /// Total assets confirmed deleted
    pub deleted: usize,
    /// Number of rounds executed
    pub rounds: usize,
    /// True if the loop stopped on the cancellation flag
    pub cancelled: bool,
    /// Ids still in the pool (empty unless cancelled)
    pub remaining: BTreeSet<AssetId>,
}

/// DeletionSequencer driving the multi-round deletion loop.
///
/// Each round rebuilds the relational map over the current pool, selects a
/// safe batch, requests physical deletion from the executor and removes
/// only the confirmed-deleted ids from the pool. Rounds are strictly
/// sequential; this is the only component with an external side effect.
///
/// Batch selection, in priority order:
/// 1. all members of all circular components - deleting a whole cycle
///    atomically is the only way to make progress without temporarily
///    breaking a live reference;
/// 2. else all root nodes;
/// 3. else the first `chunk_limit` remaining ids, to guarantee forward
///    progress on inconsistent catalog data instead of looping forever.
pub struct DeletionSequencer<'a, D: DeletionExecutor> {
    executor: &'a D,
    chunk_limit: usize,
}

impl<'a, D: DeletionExecutor> DeletionSequencer<'a, D> {
    pub fn new(executor: &'a D) -> Self {
        Self {
            executor,
            chunk_limit: DEFAULT_CHUNK_LIMIT,
        }
    }

    /// Overrides the fallback chunk limit. Values below 1 are clamped to 1
    /// so the fallback can always make progress.
    pub fn with_chunk_limit(mut self, chunk_limit: usize) -> Self {
        self.chunk_limit = chunk_limit.max(1);
        self
    }

    /// Runs the deletion loop to completion, cancellation or failure.
    ///
    /// `cancel` is checked between rounds only (best-effort cancellation);
    /// a cancelled loop leaves the pool consistent and returns the count
    /// so far. `on_round` receives a [`RoundProgress`] after every round.
    ///
    /// # Errors
    /// - [`CleanerError::MissingRecord`] if a pool id has no catalog record.
    /// - [`CleanerError::NoProgress`] if a round deletes zero assets while
    ///   the pool is non-empty. This is terminal; the residual pool travels
    ///   in the error so the caller can inspect or report it.
    pub fn run(
        &self,
        mut pool: BTreeSet<AssetId>,
        records: &HashMap<AssetId, AssetRecord>,
        cancel: Option<&AtomicBool>,
        mut on_round: impl FnMut(&RoundProgress),
    ) -> Result<DeletionOutcome> {
        let mut deleted_total = 0usize;
        let mut rounds = 0usize;

        while !pool.is_empty() {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    return Ok(DeletionOutcome {
                        deleted: deleted_total,
                        rounds,
                        cancelled: true,
                        remaining: pool,
                    });
                }
            }

            let map = RelationalMap::build(&pool, records)?;
            let batch = self.select_batch(&map, &pool);
            debug_assert!(!batch.is_empty());

            let confirmed = self.executor.delete(&batch)?;
            // the executor must never remove something not requested;
            // drop any ids it reports outside the batch
            let confirmed: BTreeSet<AssetId> =
                confirmed.intersection(&batch).cloned().collect();

            if confirmed.is_empty() {
                return Err(CleanerError::NoProgress {
                    remaining: pool.iter().map(|id| id.to_string()).collect(),
                }
                .into());
            }

            for id in &confirmed {
                pool.remove(id);
            }
            deleted_total += confirmed.len();
            rounds += 1;

            on_round(&RoundProgress {
                round: rounds,
                batch_size: batch.len(),
                deleted_in_round: confirmed.len(),
                deleted_total,
                remaining: pool.len(),
            });
        }

        Ok(DeletionOutcome {
            deleted: deleted_total,
            rounds,
            cancelled: false,
            remaining: pool,
        })
    }

    fn select_batch(&self, map: &RelationalMap, pool: &BTreeSet<AssetId>) -> BTreeSet<AssetId> {
        let circulars = map.circular_nodes();
        if !circulars.is_empty() {
            return circulars.iter().map(|node| node.id().clone()).collect();
        }

        let roots = map.root_nodes();
        if !roots.is_empty() {
            return roots.iter().map(|node| node.id().clone()).collect();
        }

        // defensive guard for mis-pruned catalog edges; the chunk order is
        // not meaningful
        pool.iter().take(self.chunk_limit).cloned().collect()
    }
}

use super::{AssetId, AssetRecord, GraphNode, NodeKind};
use crate::cleaning::services::NodeClassifier;
use crate::shared::error::CleanerError;
use crate::shared::Result;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// The relational map: one [`GraphNode`] per pool member, keyed by
/// [`AssetId`], with every edge restricted to the pool.
///
/// Invariants:
/// - every id appearing in any node's edge sets is a key of the map
///   (edges pointing outside the pool are pruned, never left dangling);
/// - the map is rebuilt from scratch on every pool change, never patched
///   incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationalMap {
    nodes: BTreeMap<AssetId, GraphNode>,
}

impl RelationalMap {
    /// Builds the map over `pool` from the catalog `records` and classifies
    /// every node.
    ///
    /// Edge sets are the record's declared edges intersected with the pool,
    /// computed in a single pass over the pool (the catalog is not
    /// re-queried per node).
    ///
    /// # Errors
    /// [`CleanerError::MissingRecord`] if an id in the pool has no backing
    /// record. This is an upstream data-consistency bug; the whole build
    /// fails and is not retried.
    pub fn build(
        pool: &BTreeSet<AssetId>,
        records: &HashMap<AssetId, AssetRecord>,
    ) -> Result<Self> {
        let mut nodes = BTreeMap::new();

        for id in pool {
            let record = records.get(id).ok_or_else(|| CleanerError::MissingRecord {
                id: id.to_string(),
            })?;

            let dependencies: BTreeSet<AssetId> = record
                .depends_on()
                .iter()
                .filter(|dep| pool.contains(*dep))
                .cloned()
                .collect();
            let referencers: BTreeSet<AssetId> = record
                .depended_on_by()
                .iter()
                .filter(|referencer| pool.contains(*referencer))
                .cloned()
                .collect();

            nodes.insert(id.clone(), GraphNode::new(id.clone(), dependencies, referencers));
        }

        NodeClassifier::classify(&mut nodes);

        Ok(Self { nodes })
    }

    /// An empty map, used before the first scan
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &AssetId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Nodes with no in-pool referencers, in id order
    pub fn root_nodes(&self) -> Vec<&GraphNode> {
        self.nodes
            .values()
            .filter(|node| node.kind() == NodeKind::Root)
            .collect()
    }

    /// Members of in-pool dependency cycles, in id order
    pub fn circular_nodes(&self) -> Vec<&GraphNode> {
        self.nodes
            .values()
            .filter(|node| node.kind() == NodeKind::Circular)
            .collect()
    }

    /// Nodes with no in-pool dependencies, in id order.
    ///
    /// This is the leaf predicate, not the primary tag: a root whose
    /// dependency set is empty appears here too.
    pub fn leaf_nodes(&self) -> Vec<&GraphNode> {
        self.nodes.values().filter(|node| node.is_leaf()).collect()
    }
}

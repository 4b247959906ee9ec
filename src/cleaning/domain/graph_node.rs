use super::AssetId;
use std::collections::BTreeSet;

/// Primary classification of a node in the relational map.
///
/// Precedence when a node satisfies more than one predicate:
/// Root > Circular > Leaf > Internal. A root with no referencers is always
/// safe to delete regardless of what it depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// No in-pool referencers; nothing in the pool still needs it
    Root,
    /// Member of a dependency cycle entirely inside the pool
    Circular,
    /// No in-pool dependencies; informational, not a safety criterion
    Leaf,
    /// Everything else
    Internal,
}

/// One node of the relational map: an asset plus its dependency and
/// referencer edges restricted to the current pool.
///
/// Edge sets are recomputed from the catalog records whenever the pool
/// changes; a node never holds edges pointing outside the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    id: AssetId,
    dependencies: BTreeSet<AssetId>,
    referencers: BTreeSet<AssetId>,
    kind: NodeKind,
}

impl GraphNode {
    pub(crate) fn new(
        id: AssetId,
        dependencies: BTreeSet<AssetId>,
        referencers: BTreeSet<AssetId>,
    ) -> Self {
        Self {
            id,
            dependencies,
            referencers,
            // provisional; the classifier assigns the final kind
            kind: NodeKind::Internal,
        }
    }

    pub(crate) fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    pub fn id(&self) -> &AssetId {
        &self.id
    }

    /// In-pool assets this node depends on
    pub fn dependencies(&self) -> &BTreeSet<AssetId> {
        &self.dependencies
    }

    /// In-pool assets that depend on this node
    pub fn referencers(&self) -> &BTreeSet<AssetId> {
        &self.referencers
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// True iff the referencer set is empty
    pub fn is_root(&self) -> bool {
        self.referencers.is_empty()
    }

    /// True iff the dependency set is empty
    pub fn is_leaf(&self) -> bool {
        self.dependencies.is_empty()
    }
}

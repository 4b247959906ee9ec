use super::{AssetClass, AssetId};
use std::collections::BTreeSet;

/// Operator-supplied exclusion rules: exact assets, path prefixes and
/// asset classes. The session resolves these to a concrete set of
/// explicitly excluded ids at scan/rebuild time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionPolicy {
    pub assets: BTreeSet<AssetId>,
    pub paths: Vec<String>,
    pub classes: BTreeSet<AssetClass>,
}

impl ExclusionPolicy {
    pub fn new(assets: BTreeSet<AssetId>, paths: Vec<String>, classes: BTreeSet<AssetClass>) -> Self {
        Self {
            assets,
            paths,
            classes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.paths.is_empty() && self.classes.is_empty()
    }
}

/// The published result of exclusion propagation.
///
/// `excluded` holds the explicitly excluded ids (intersected with the
/// pool); `linked` holds everything reachable from an excluded asset via
/// one or more dependency edges, minus `excluded` itself. The two sets are
/// always disjoint. Both are removed from the deletable pool before the
/// next graph rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    excluded: BTreeSet<AssetId>,
    linked: BTreeSet<AssetId>,
}

impl ExclusionSet {
    pub(crate) fn new(excluded: BTreeSet<AssetId>, linked: BTreeSet<AssetId>) -> Self {
        debug_assert!(excluded.is_disjoint(&linked));
        Self { excluded, linked }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Explicitly excluded ids, in id order
    pub fn excluded(&self) -> &BTreeSet<AssetId> {
        &self.excluded
    }

    /// Transitively protected ids, in id order
    pub fn linked(&self) -> &BTreeSet<AssetId> {
        &self.linked
    }

    /// True iff the id is excluded or linked
    pub fn is_protected(&self, id: &AssetId) -> bool {
        self.excluded.contains(id) || self.linked.contains(id)
    }

    pub fn protected_count(&self) -> usize {
        self.excluded.len() + self.linked.len()
    }
}

use crate::cleaning::domain::{AssetId, ExclusionSet, RelationalMap};
use std::collections::BTreeSet;

/// ExclusionPropagator service computing the linked-asset closure of an
/// explicit exclusion set.
///
/// If an asset is protected, everything it needs to function must also be
/// protected, or deletion would corrupt the protected asset. Only forward
/// (dependency) reachability propagates; assets that merely depend on an
/// excluded asset are not protected.
pub struct ExclusionPropagator;

impl ExclusionPropagator {
    /// Computes `{excluded, linked}` over the map's pool.
    ///
    /// `excluded` is the explicit set intersected with the pool (ids
    /// outside the pool are silently dropped). `linked` is every id
    /// reachable from an excluded node via dependency edges, any number of
    /// hops, minus `excluded` itself; an excluded asset stays "excluded"
    /// even if another excluded asset depends on it.
    pub fn propagate(map: &RelationalMap, explicit: &BTreeSet<AssetId>) -> ExclusionSet {
        let excluded: BTreeSet<AssetId> = explicit
            .iter()
            .filter(|id| map.contains(id))
            .cloned()
            .collect();

        let mut reachable: BTreeSet<AssetId> = BTreeSet::new();
        let mut worklist: Vec<AssetId> = excluded.iter().cloned().collect();

        while let Some(current) = worklist.pop() {
            let Some(node) = map.get(&current) else { continue };
            for dep in node.dependencies() {
                if reachable.insert(dep.clone()) {
                    worklist.push(dep.clone());
                }
            }
        }

        let linked: BTreeSet<AssetId> = reachable.difference(&excluded).cloned().collect();

        ExclusionSet::new(excluded, linked)
    }
}

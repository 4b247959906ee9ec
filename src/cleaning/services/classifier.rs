use crate::cleaning::domain::{AssetId, GraphNode, NodeKind};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// NodeClassifier service computing the root/leaf/circular partition over
/// the pool-restricted dependency graph.
///
/// This is pure business logic with no I/O dependencies; it works only on
/// the node arena built by [`crate::cleaning::domain::RelationalMap`].
pub struct NodeClassifier;

impl NodeClassifier {
    /// Assigns the primary [`NodeKind`] to every node.
    ///
    /// - Root iff the referencer set is empty.
    /// - Circular iff the node is a member of a dependency SCC of size > 1,
    ///   or carries a self-loop.
    /// - Leaf iff the dependency set is empty.
    /// - Internal otherwise.
    ///
    /// Precedence: Root > Circular > Leaf > Internal. An empty arena is a
    /// no-op.
    pub fn classify(nodes: &mut BTreeMap<AssetId, GraphNode>) {
        let circular = Self::circular_members(nodes);

        for (id, node) in nodes.iter_mut() {
            let kind = if node.is_root() {
                NodeKind::Root
            } else if circular.contains(id) {
                NodeKind::Circular
            } else if node.is_leaf() {
                NodeKind::Leaf
            } else {
                NodeKind::Internal
            };
            node.set_kind(kind);
        }
    }

    /// Collects every node lying on a dependency cycle entirely inside the
    /// pool, via Tarjan's strongly-connected-components algorithm.
    ///
    /// The traversal is iterative with an explicit frame stack so that
    /// deep dependency chains cannot overflow the call stack.
    fn circular_members(nodes: &BTreeMap<AssetId, GraphNode>) -> BTreeSet<AssetId> {
        let mut next_index = 0usize;
        let mut index: HashMap<AssetId, usize> = HashMap::with_capacity(nodes.len());
        let mut lowlink: HashMap<AssetId, usize> = HashMap::with_capacity(nodes.len());
        let mut on_stack: HashSet<AssetId> = HashSet::with_capacity(nodes.len());
        let mut stack: Vec<AssetId> = Vec::new();
        let mut circular: BTreeSet<AssetId> = BTreeSet::new();

        // frame: (node id, dependency list, next dependency position)
        let mut frames: Vec<(AssetId, Vec<AssetId>, usize)> = Vec::new();

        let mut push_node = |id: &AssetId,
                             next_index: &mut usize,
                             index: &mut HashMap<AssetId, usize>,
                             lowlink: &mut HashMap<AssetId, usize>,
                             stack: &mut Vec<AssetId>,
                             on_stack: &mut HashSet<AssetId>,
                             frames: &mut Vec<(AssetId, Vec<AssetId>, usize)>| {
            index.insert(id.clone(), *next_index);
            lowlink.insert(id.clone(), *next_index);
            *next_index += 1;
            stack.push(id.clone());
            on_stack.insert(id.clone());
            let deps: Vec<AssetId> = nodes[id].dependencies().iter().cloned().collect();
            frames.push((id.clone(), deps, 0));
        };

        for start in nodes.keys() {
            if index.contains_key(start) {
                continue;
            }

            push_node(
                start,
                &mut next_index,
                &mut index,
                &mut lowlink,
                &mut stack,
                &mut on_stack,
                &mut frames,
            );

            loop {
                let (current, next_dep) = {
                    let Some(frame) = frames.last_mut() else { break };
                    let next = if frame.2 < frame.1.len() {
                        let dep = frame.1[frame.2].clone();
                        frame.2 += 1;
                        Some(dep)
                    } else {
                        None
                    };
                    (frame.0.clone(), next)
                };

                match next_dep {
                    Some(dep) => {
                        if !index.contains_key(&dep) {
                            push_node(
                                &dep,
                                &mut next_index,
                                &mut index,
                                &mut lowlink,
                                &mut stack,
                                &mut on_stack,
                                &mut frames,
                            );
                        } else if on_stack.contains(&dep) {
                            let dep_index = index[&dep];
                            let current_lowlink = lowlink.get_mut(&current).unwrap();
                            if dep_index < *current_lowlink {
                                *current_lowlink = dep_index;
                            }
                        }
                    }
                    None => {
                        let current_lowlink = lowlink[&current];
                        if current_lowlink == index[&current] {
                            let mut component = Vec::new();
                            while let Some(member) = stack.pop() {
                                on_stack.remove(&member);
                                let is_scc_head = member == current;
                                component.push(member);
                                if is_scc_head {
                                    break;
                                }
                            }

                            let self_loop = component.len() == 1
                                && nodes[&component[0]].dependencies().contains(&component[0]);
                            if component.len() > 1 || self_loop {
                                circular.extend(component);
                            }
                        }

                        frames.pop();
                        if let Some(parent) = frames.last().map(|frame| frame.0.clone()) {
                            if current_lowlink < lowlink[&parent] {
                                lowlink.insert(parent, current_lowlink);
                            }
                        }
                    }
                }
            }
        }

        circular
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn id(s: &str) -> AssetId {
        AssetId::new(s.to_string()).unwrap()
    }

    /// Builds a node arena from (asset, dependencies) pairs; referencers
    /// are derived by inverting the dependency edges.
    fn arena(edges: &[(&str, &[&str])]) -> BTreeMap<AssetId, GraphNode> {
        let mut referencers: BTreeMap<AssetId, BTreeSet<AssetId>> = BTreeMap::new();
        for (asset, deps) in edges {
            referencers.entry(id(asset)).or_default();
            for dep in *deps {
                referencers.entry(id(dep)).or_default().insert(id(asset));
            }
        }

        edges
            .iter()
            .map(|(asset, deps)| {
                let asset_id = id(asset);
                let dependencies: BTreeSet<AssetId> = deps.iter().map(|d| id(d)).collect();
                let refs = referencers.remove(&asset_id).unwrap_or_default();
                (
                    asset_id.clone(),
                    GraphNode::new(asset_id, dependencies, refs),
                )
            })
            .collect()
    }

    fn kinds(nodes: &BTreeMap<AssetId, GraphNode>) -> BTreeMap<String, NodeKind> {
        nodes
            .iter()
            .map(|(id, node)| (id.to_string(), node.kind()))
            .collect()
    }

    #[test]
    fn test_classify_empty_arena() {
        let mut nodes = BTreeMap::new();
        NodeClassifier::classify(&mut nodes);
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_classify_chain() {
        // a -> b -> c: a is root, c is leaf, b is internal
        let mut nodes = arena(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
        NodeClassifier::classify(&mut nodes);

        let kinds = kinds(&nodes);
        assert_eq!(kinds["a"], NodeKind::Root);
        assert_eq!(kinds["b"], NodeKind::Internal);
        assert_eq!(kinds["c"], NodeKind::Leaf);
    }

    #[test]
    fn test_classify_mutual_cycle() {
        let mut nodes = arena(&[("a", &["b"]), ("b", &["a"])]);
        NodeClassifier::classify(&mut nodes);

        let kinds = kinds(&nodes);
        assert_eq!(kinds["a"], NodeKind::Circular);
        assert_eq!(kinds["b"], NodeKind::Circular);
    }

    #[test]
    fn test_classify_self_loop_is_circular() {
        let mut nodes = arena(&[("a", &["a"])]);
        NodeClassifier::classify(&mut nodes);

        assert_eq!(nodes[&id("a")].kind(), NodeKind::Circular);
    }

    #[test]
    fn test_classify_two_disjoint_cycles() {
        let mut nodes = arena(&[
            ("a", &["b"]),
            ("b", &["a"]),
            ("c", &["d"]),
            ("d", &["e"]),
            ("e", &["c"]),
        ]);
        NodeClassifier::classify(&mut nodes);

        for (_, node) in nodes.iter() {
            assert_eq!(node.kind(), NodeKind::Circular);
        }
    }

    #[test]
    fn test_classify_cycle_with_external_entry() {
        // entry -> a -> b -> a: entry is root, a and b are circular
        let mut nodes = arena(&[("entry", &["a"]), ("a", &["b"]), ("b", &["a"])]);
        NodeClassifier::classify(&mut nodes);

        let kinds = kinds(&nodes);
        assert_eq!(kinds["entry"], NodeKind::Root);
        assert_eq!(kinds["a"], NodeKind::Circular);
        assert_eq!(kinds["b"], NodeKind::Circular);
    }

    #[test]
    fn test_root_precedence_over_leaf() {
        // isolated node: both root and leaf predicates hold, Root wins
        let mut nodes = arena(&[("isolated", &[])]);
        NodeClassifier::classify(&mut nodes);

        let node = &nodes[&id("isolated")];
        assert_eq!(node.kind(), NodeKind::Root);
        assert!(node.is_leaf());
    }

    #[test]
    fn test_classify_deep_chain_does_not_overflow() {
        // a long dependency chain exercises the iterative traversal
        let names: Vec<String> = (0..5_000).map(|i| format!("asset_{:05}", i)).collect();
        let mut edges: Vec<(&str, Vec<&str>)> = Vec::new();
        for i in 0..names.len() {
            let deps = if i + 1 < names.len() {
                vec![names[i + 1].as_str()]
            } else {
                vec![]
            };
            edges.push((names[i].as_str(), deps));
        }
        let borrowed: Vec<(&str, &[&str])> =
            edges.iter().map(|(n, d)| (*n, d.as_slice())).collect();
        let mut nodes = arena(&borrowed);

        NodeClassifier::classify(&mut nodes);
        assert_eq!(nodes[&id("asset_00000")].kind(), NodeKind::Root);
        assert_eq!(nodes[&id("asset_04999")].kind(), NodeKind::Leaf);
    }
}

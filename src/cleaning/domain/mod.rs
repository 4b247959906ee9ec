pub mod asset;
pub mod exclusion;
pub mod graph_node;
pub mod relational_map;

pub use asset::{AssetClass, AssetId, AssetRecord};
pub use exclusion::{ExclusionPolicy, ExclusionSet};
pub use graph_node::{GraphNode, NodeKind};
pub use relational_map::RelationalMap;

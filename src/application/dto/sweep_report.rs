use crate::cleaning::domain::{AssetRecord, GraphNode, NodeKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One asset row in the report, denormalized for presentation
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AssetView {
    pub id: String,
    pub class: String,
    pub size_bytes: u64,
    pub kind: String,
}

impl AssetView {
    pub(crate) fn from_node(node: &GraphNode, record: &AssetRecord) -> Self {
        Self {
            id: node.id().to_string(),
            class: record.class().to_string(),
            size_bytes: record.size_bytes(),
            kind: kind_label(node.kind()).to_string(),
        }
    }

    pub(crate) fn from_record(record: &AssetRecord, kind: &str) -> Self {
        Self {
            id: record.id().to_string(),
            class: record.class().to_string(),
            size_bytes: record.size_bytes(),
            kind: kind.to_string(),
        }
    }
}

fn kind_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Root => "root",
        NodeKind::Circular => "circular",
        NodeKind::Leaf => "leaf",
        NodeKind::Internal => "internal",
    }
}

/// Aggregate counters for a scan, mirrored in the report and the
/// post-delete summary
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CleaningStats {
    /// Assets in the deletable pool
    pub unused_assets: usize,
    /// Total byte size of the deletable pool
    pub unused_total_size_bytes: u64,
    pub root_assets: usize,
    pub leaf_assets: usize,
    pub circular_assets: usize,
    pub excluded_assets: usize,
    pub linked_assets: usize,
    /// Assets deleted by this session so far
    pub deleted_assets: usize,
}

/// Report metadata: a unique scan id and the generation timestamp
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScanMetadata {
    pub scan_id: String,
    pub generated_at: DateTime<Utc>,
    pub tool: String,
    pub tool_version: String,
}

impl ScanMetadata {
    pub fn generate() -> Self {
        Self {
            scan_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            tool: "asset-sweep".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// SweepReport - read model of one completed scan
///
/// Snapshot data only: the report never holds live references into the
/// session and stays valid after further mutations.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SweepReport {
    pub metadata: ScanMetadata,
    pub stats: CleaningStats,
    /// Deletable assets with no in-pool referencers
    pub roots: Vec<AssetView>,
    /// Deletable assets with no in-pool dependencies
    pub leaves: Vec<AssetView>,
    /// Deletable assets on in-pool dependency cycles
    pub circulars: Vec<AssetView>,
    /// Explicitly excluded assets
    pub excluded: Vec<AssetView>,
    /// Assets protected transitively through an excluded asset
    pub linked: Vec<AssetView>,
}

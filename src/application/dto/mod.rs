pub mod sweep_report;

pub use sweep_report::{AssetView, CleaningStats, ScanMetadata, SweepReport};

/// Mock implementations for testing
mod mock_asset_catalog;
mod mock_deletion_executor;
mod mock_progress_reporter;

pub use mock_asset_catalog::MockAssetCatalog;
pub use mock_deletion_executor::MockDeletionExecutor;
pub use mock_progress_reporter::MockProgressReporter;

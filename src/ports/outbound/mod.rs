/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (asset catalog, file system,
/// console, etc.).
pub mod asset_catalog;
pub mod deletion_executor;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;

pub use asset_catalog::AssetCatalog;
pub use deletion_executor::DeletionExecutor;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;

//! asset-sweep - unused asset detection and safe deletion for content repositories
//!
//! This library builds a dependency graph over the unused assets of a content
//! repository, classifies them, and drives a multi-round deletion loop that
//! never breaks a live reference, following hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`cleaning`): Pure graph model, classification and deletion sequencing
//! - **Application Layer** (`application`): The cleaner session facade and report read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use asset_sweep::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let catalog = ManifestCatalog::new(PathBuf::from("content"));
//!
//! // Scan the repository
//! let session = CleanerSession::scan(&catalog, ExclusionPolicy::default())?;
//!
//! // Format the report
//! let formatter = JsonFormatter::new();
//! let output = formatter.format(&session.report())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cleaning;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemDeleter, FileSystemWriter, ManifestCatalog, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{CleaningStats, ScanMetadata, SweepReport};
    pub use crate::application::CleanerSession;
    pub use crate::cleaning::domain::{
        AssetClass, AssetId, AssetRecord, ExclusionPolicy, ExclusionSet, GraphNode, NodeKind,
        RelationalMap,
    };
    pub use crate::cleaning::services::{
        DeletionOutcome, DeletionSequencer, ExclusionPropagator, NodeClassifier, RoundProgress,
    };
    pub use crate::ports::outbound::{
        AssetCatalog, DeletionExecutor, OutputPresenter, ProgressReporter, ReportFormatter,
    };
    pub use crate::shared::Result;
}

/// Filesystem adapters for catalog input, asset deletion and report output
mod file_deleter;
mod file_writer;
mod manifest_catalog;

pub use file_deleter::FileSystemDeleter;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use manifest_catalog::{ManifestCatalog, MANIFEST_FILENAME};

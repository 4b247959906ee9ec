use crate::shared::Result;

/// OutputPresenter port for delivering the formatted report
///
/// Implementations write to stdout, a file, or any other sink.
pub trait OutputPresenter {
    /// Presents the formatted output
    ///
    /// # Errors
    /// Returns an error if the output cannot be written.
    fn present(&self, content: &str) -> Result<()>;
}

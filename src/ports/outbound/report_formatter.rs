use crate::application::dto::SweepReport;
use crate::shared::Result;

/// ReportFormatter port for rendering a sweep report
///
/// Implementations turn the report read model into an output string
/// (JSON, Markdown, ...).
pub trait ReportFormatter {
    /// Formats the report into its output representation
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    fn format(&self, report: &SweepReport) -> Result<String>;
}

//! Output formatter trait

use council_domain::ReviewReport;

/// Trait for formatting review reports
pub trait OutputFormatter {
    /// Format the complete report
    fn format(&self, report: &ReviewReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &ReviewReport) -> String;

    /// Format verdict and issue list only (concise output)
    fn format_summary(&self, report: &ReviewReport) -> String;
}

//! Output formatter trait

use scopelens_domain::{AnalysisResult, OutputFormat};

/// Trait for formatting analysis results
pub trait OutputFormatter {
    /// Format the complete report
    fn format(&self, result: &AnalysisResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &AnalysisResult) -> String;

    /// Title, summary and score only
    fn format_summary(&self, result: &AnalysisResult) -> String;

    /// Format in the requested layout
    fn render(&self, result: &AnalysisResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(result),
            OutputFormat::Summary => self.format_summary(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}

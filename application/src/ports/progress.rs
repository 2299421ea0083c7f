//! Progress notification port
//!
//! Defines the interface for reporting progress while a generation call
//! is outstanding.

/// Callback for progress updates around generation calls
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, nothing).
pub trait AnalysisProgressNotifier: Send + Sync {
    /// Called right before the analysis call is sent
    fn on_analysis_start(&self, model: &str);

    /// Called when the analysis call resolved, successfully or not
    fn on_analysis_complete(&self, success: bool);

    /// Called right before a follow-up call is sent
    fn on_follow_up_start(&self) {}

    /// Called when a follow-up call resolved
    fn on_follow_up_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl AnalysisProgressNotifier for NoProgress {
    fn on_analysis_start(&self, _model: &str) {}
    fn on_analysis_complete(&self, _success: bool) {}
}

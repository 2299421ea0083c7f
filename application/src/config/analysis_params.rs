//! Analysis parameters: what every generation call is sent with.
//!
//! [`AnalysisParams`] groups the static parameters shared by
//! [`RunAnalysisUseCase`](crate::use_cases::run_analysis::RunAnalysisUseCase)
//! and [`AskFollowUpUseCase`](crate::use_cases::ask_follow_up::AskFollowUpUseCase).
//! They are established at startup and do not change during a session.

use scopelens_domain::{DEFAULT_HISTORY_WINDOW, Model, OutputLanguage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Generation model for both analysis and follow-up calls.
    pub model: Model,
    /// Language every response is requested in.
    pub language: OutputLanguage,
    /// Number of trailing chat messages replayed as follow-up context.
    pub history_window: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            language: OutputLanguage::default(),
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

impl AnalysisParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_language(mut self, language: OutputLanguage) -> Self {
        self.language = language;
        self
    }

    /// A window of 0 is bumped to 1 so the last turn is always replayed.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = AnalysisParams::default();
        assert_eq!(params.model, Model::Gemini25Flash);
        assert_eq!(params.language, OutputLanguage::thai());
        assert_eq!(params.history_window, 10);
    }

    #[test]
    fn test_builder() {
        let params = AnalysisParams::default()
            .with_model(Model::Gemini25Pro)
            .with_language(OutputLanguage::english())
            .with_history_window(4);
        assert_eq!(params.model, Model::Gemini25Pro);
        assert_eq!(params.language.name(), "English");
        assert_eq!(params.history_window, 4);
    }

    #[test]
    fn test_zero_window_is_bumped() {
        assert_eq!(AnalysisParams::default().with_history_window(0).history_window, 1);
    }
}

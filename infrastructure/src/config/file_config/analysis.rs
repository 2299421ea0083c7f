//! Analysis configuration from TOML (`[analysis]` section)

use scopelens_domain::{AmbitionLevel, DEFAULT_HISTORY_WINDOW, OutputLanguage};
use serde::{Deserialize, Serialize};

/// Raw analysis configuration
///
/// # Example
///
/// ```toml
/// [analysis]
/// ambition = 70
/// language = "English"
/// history_window = 6
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalysisConfig {
    /// Initial ambition level (20-100, step 10)
    pub ambition: Option<u8>,
    /// Response language name, e.g. "Thai" or "English"
    pub language: Option<String>,
    /// Chat messages replayed as follow-up context
    pub history_window: usize,
}

impl Default for FileAnalysisConfig {
    fn default() -> Self {
        Self {
            ambition: None,
            language: None,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

impl FileAnalysisConfig {
    /// Configured ambition; invalid values are reported by `validate`
    pub fn parse_ambition(&self) -> Option<AmbitionLevel> {
        self.ambition.and_then(|v| AmbitionLevel::new(v).ok())
    }

    pub fn parse_language(&self) -> Option<OutputLanguage> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(OutputLanguage::from)
    }
}

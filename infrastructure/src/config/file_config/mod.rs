//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod analysis;
mod generation;
mod logging;
mod output;
mod repl;

pub use analysis::FileAnalysisConfig;
pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use repl::FileReplConfig;

use scopelens_application::AnalysisParams;
use scopelens_domain::AmbitionLevel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("generation.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("generation.model cannot be empty")]
    EmptyModelName,

    #[error("generation.api_key_env cannot be empty")]
    EmptyKeyVariable,

    #[error("analysis.history_window cannot be 0")]
    InvalidHistoryWindow,

    #[error("analysis.ambition must be 20-100 in steps of 10, got {0}")]
    InvalidAmbition(u8),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generation service settings
    pub generation: FileGenerationConfig,
    /// Analysis defaults
    pub analysis: FileAnalysisConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.generation.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if let Some(model) = &self.generation.model
            && model.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if let Some(var) = &self.generation.api_key_env
            && var.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyKeyVariable);
        }

        if self.analysis.history_window == 0 {
            return Err(ConfigValidationError::InvalidHistoryWindow);
        }

        if let Some(value) = self.analysis.ambition
            && AmbitionLevel::new(value).is_err()
        {
            return Err(ConfigValidationError::InvalidAmbition(value));
        }

        Ok(())
    }

    /// Parameters shared by every generation call
    pub fn analysis_params(&self) -> AnalysisParams {
        let mut params =
            AnalysisParams::default().with_history_window(self.analysis.history_window);
        if let Some(model) = self.generation.parse_model() {
            params = params.with_model(model);
        }
        if let Some(language) = self.analysis.parse_language() {
            params = params.with_language(language);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopelens_domain::{Model, OutputFormat, OutputLanguage};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[generation]
model = "gemini-2.5-pro"
base_url = "http://localhost:8080/v1beta"
timeout_seconds = 30
api_key_env = "SCOPELENS_KEY"

[analysis]
ambition = 80
language = "English"
history_window = 6

[output]
format = "summary"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/scopelens/history.txt"

[logging]
conversation_log = "logs/session.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.parse_model(), Some(Model::Gemini25Pro));
        assert_eq!(config.generation.timeout_seconds, 30);
        assert_eq!(config.analysis.ambition, Some(80));
        assert_eq!(config.analysis.history_window, 6);
        assert_eq!(config.output.format, Some(OutputFormat::Summary));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("logs/session.jsonl")
        );
        assert!(config.validate().is_ok());

        let params = config.analysis_params();
        assert_eq!(params.model, Model::Gemini25Pro);
        assert_eq!(params.language, OutputLanguage::english());
        assert_eq!(params.history_window, 6);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[analysis]
ambition = 30
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.ambition, Some(30));
        // Defaults should apply
        assert_eq!(config.generation.timeout_seconds, 120);
        assert_eq!(config.analysis.history_window, 10);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis_params(), AnalysisParams::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            ("[generation]\ntimeout_seconds = 0", ConfigValidationError::InvalidTimeout),
            ("[generation]\nmodel = \"  \"", ConfigValidationError::EmptyModelName),
            ("[generation]\napi_key_env = \"\"", ConfigValidationError::EmptyKeyVariable),
            ("[analysis]\nhistory_window = 0", ConfigValidationError::InvalidHistoryWindow),
            ("[analysis]\nambition = 45", ConfigValidationError::InvalidAmbition(45)),
        ];

        for (toml_str, expected) in cases {
            let config: FileConfig = toml::from_str(toml_str).unwrap();
            assert_eq!(config.validate(), Err(expected), "{}", toml_str);
        }
    }
}

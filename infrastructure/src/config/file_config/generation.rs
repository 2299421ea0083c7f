//! Generation service configuration from TOML (`[generation]` section)

use crate::gemini::{DEFAULT_BASE_URL, DEFAULT_KEY_VARS, GeminiConfig};
use scopelens_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw generation service configuration
///
/// # Example
///
/// ```toml
/// [generation]
/// model = "gemini-2.5-pro"
/// timeout_seconds = 60
/// api_key_env = "MY_GEMINI_KEY"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Model identifier
    pub model: Option<String>,
    /// Override for the API base URL (proxies, test servers)
    pub base_url: Option<String>,
    /// Client timeout for every call
    pub timeout_seconds: u64,
    /// Environment variable holding the API key; replaces the default lookup
    pub api_key_env: Option<String>,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            model: None,
            base_url: None,
            timeout_seconds: 120,
            api_key_env: None,
        }
    }
}

impl FileGenerationConfig {
    /// Configured model, or `None` when unset or blank
    pub fn parse_model(&self) -> Option<Model> {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Model::from)
    }

    /// Environment variables to search for the API key, in order
    pub fn key_vars(&self) -> Vec<String> {
        match &self.api_key_env {
            Some(name) => vec![name.trim().to_string()],
            None => DEFAULT_KEY_VARS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn to_gemini_config(&self) -> GeminiConfig {
        GeminiConfig::default()
            .with_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
            .with_timeout(Duration::from_secs(self.timeout_seconds))
    }
}

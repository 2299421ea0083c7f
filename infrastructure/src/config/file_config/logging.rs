//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL conversation log path
    pub conversation_log: Option<String>,
    /// Directory for daily-rotated diagnostic log files
    pub file_dir: Option<String>,
}

//! Infrastructure layer for scopelens
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod dataset;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAnalysisConfig, FileConfig, FileGenerationConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileReplConfig,
};
pub use dataset::LocalDatasetReader;
pub use gemini::{Credential, GeminiConfig, GeminiGateway};
pub use logging::JsonlConversationLogger;

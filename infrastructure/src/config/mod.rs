//! Configuration file loading for scopelens
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SCOPELENS_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./scopelens.toml` or `./.scopelens.toml`
//! 4. Global: `$XDG_CONFIG_HOME/scopelens/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAnalysisConfig, FileConfig, FileGenerationConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileReplConfig,
};
pub use loader::ConfigLoader;

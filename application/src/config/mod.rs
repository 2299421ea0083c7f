//! Application-level configuration.
//!
//! - [`AnalysisParams`]: model, language and history window used by the use cases

pub mod analysis_params;

pub use analysis_params::AnalysisParams;

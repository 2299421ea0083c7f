//! Prompt domain
//!
//! Templates for the analysis and follow-up prompts, and the fixed
//! language every response is requested in.

mod language;
mod template;

pub use language::OutputLanguage;
pub use template::PromptTemplate;

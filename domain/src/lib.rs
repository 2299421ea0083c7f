//! Domain layer for scopelens
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Analysis
//!
//! A dataset and a job-scope description are sent to a generation service
//! together with an [`AmbitionLevel`]. The service answers with a structured
//! [`AnalysisResult`] whose shape is fixed by [`AnalysisSchema`].
//!
//! ## Follow-up chat
//!
//! Once a result exists, questions about it are answered with the last few
//! [`ChatMessage`]s replayed as context. A new analysis starts a fresh
//! [`ChatHistory`].
//!
//! ## Session
//!
//! [`Session`] holds the inputs, the current result and the transcript, and
//! moves between [`SessionPhase`]s only through its transition methods.

pub mod analysis;
pub mod chat;
pub mod config;
pub mod core;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use analysis::{
    ambition::{AmbitionBand, AmbitionLevel},
    request::AnalysisRequest,
    result::{AnalysisResult, ChartDataPoint, ChartType},
    schema::{AnalysisSchema, SchemaViolation},
};
pub use chat::{
    entities::{ChatMessage, Role},
    history::{ChatHistory, DEFAULT_HISTORY_WINDOW},
};
pub use config::OutputFormat;
pub use core::{error::DomainError, model::Model};
pub use prompt::{OutputLanguage, PromptTemplate};
pub use session::{
    demo::{DEMO_DATASET, DEMO_SCOPE},
    state::{ChatRejection, PendingChat, Session, SessionPhase},
};

//! Application layer for scopelens
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::AnalysisParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    dataset_reader::{DatasetReadError, DatasetReader},
    generation_gateway::{GatewayError, GenerationGateway, GenerationRequest, OutputMode},
    progress::{AnalysisProgressNotifier, NoProgress},
};
pub use use_cases::ask_follow_up::{
    AskFollowUpError, AskFollowUpUseCase, FOLLOW_UP_EMPTY_FALLBACK, FOLLOW_UP_ERROR_FALLBACK,
    FollowUpInput,
};
pub use use_cases::run_analysis::{ANALYSIS_FAILURE_MESSAGE, RunAnalysisError, RunAnalysisUseCase};
pub use use_cases::session_controller::SessionController;

//! Ask Follow-Up use case.
//!
//! Answers a free-text question about an existing analysis. The dataset,
//! the scope and a bounded window of the chat transcript are replayed as
//! context on every call.
//!
//! Unlike [`RunAnalysisUseCase`](super::run_analysis::RunAnalysisUseCase)
//! this degrades gracefully: an empty answer becomes a fixed apology
//! instead of an error.

use crate::config::AnalysisParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::generation_gateway::{GatewayError, GenerationGateway, GenerationRequest};
use scopelens_domain::chat::history::window;
use scopelens_domain::util::preview;
use scopelens_domain::{ChatMessage, DomainError, PromptTemplate};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Answer used when the service replies with an empty body
pub const FOLLOW_UP_EMPTY_FALLBACK: &str = "ขออภัย ไม่สามารถประมวลผลคำตอบได้ในขณะนี้";

/// Characters of the question shown in the log line
const QUESTION_PREVIEW_CHARS: usize = 100;

/// Assistant turn recorded when the follow-up call itself fails
pub const FOLLOW_UP_ERROR_FALLBACK: &str =
    "ขออภัย เกิดข้อผิดพลาดในการประมวลผลคำตอบ กรุณาลองใหม่อีกครั้ง";

/// Errors that can occur while asking a follow-up question
#[derive(Error, Debug)]
pub enum AskFollowUpError {
    #[error("Invalid input: {0}")]
    Validation(#[from] DomainError),

    #[error("API key is not configured")]
    Configuration,

    #[error("Generation service error: {0}")]
    Service(#[source] GatewayError),
}

impl From<GatewayError> for AskFollowUpError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::MissingCredential => AskFollowUpError::Configuration,
            other => AskFollowUpError::Service(other),
        }
    }
}

/// Input for the [`AskFollowUpUseCase`].
///
/// `history` is the transcript before `question` was asked; the use case
/// applies the window itself.
#[derive(Debug, Clone, Copy)]
pub struct FollowUpInput<'a> {
    pub question: &'a str,
    pub dataset_text: &'a str,
    pub scope_text: &'a str,
    pub history: &'a [ChatMessage],
}

/// Use case for answering one follow-up question
pub struct AskFollowUpUseCase {
    gateway: Arc<dyn GenerationGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for AskFollowUpUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl AskFollowUpUseCase {
    pub fn new(gateway: Arc<dyn GenerationGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        input: FollowUpInput<'_>,
        params: &AnalysisParams,
    ) -> Result<String, AskFollowUpError> {
        if input.question.trim().is_empty() {
            return Err(DomainError::EmptyQuestion.into());
        }
        if !self.gateway.has_credential() {
            return Err(AskFollowUpError::Configuration);
        }

        let context = window(input.history, params.history_window);
        info!(
            "Follow-up question: {} ({} of {} messages as context)",
            preview(input.question, QUESTION_PREVIEW_CHARS),
            context.len(),
            input.history.len()
        );

        let prompt = PromptTemplate::follow_up_prompt(
            input.question,
            input.dataset_text,
            input.scope_text,
            context,
            &params.language,
        );
        debug!("Follow-up prompt: {} bytes", prompt.len());

        self.conversation_logger.log(ConversationEvent::new(
            "follow_up_question",
            serde_json::json!({
                "model": params.model.to_string(),
                "question": input.question,
                "context_messages": context.len(),
            }),
        ));

        let answer = self
            .gateway
            .generate(GenerationRequest::text(params.model.clone(), prompt))
            .await
            .inspect_err(|e| warn!("Follow-up call failed: {}", e))?;

        let answer = match answer {
            Some(text) if !text.is_empty() => text,
            _ => {
                warn!("Follow-up call returned an empty answer; using fallback");
                FOLLOW_UP_EMPTY_FALLBACK.to_string()
            }
        };

        self.conversation_logger.log(ConversationEvent::new(
            "follow_up_answer",
            serde_json::json!({
                "model": params.model.to_string(),
                "bytes": answer.len(),
                "text": answer,
            }),
        ));

        Ok(answer)
    }
}

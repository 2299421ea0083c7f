//! Run Analysis use case.
//!
//! Sends one validated [`AnalysisRequest`] to the generation service as a
//! structured-JSON call and turns the answer into an [`AnalysisResult`].
//!
//! The operation is all-or-nothing and single-shot: an empty body, a body
//! that does not match [`AnalysisSchema`], or any service failure is an
//! error, and nothing is retried.

use crate::config::AnalysisParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::generation_gateway::{GatewayError, GenerationGateway, GenerationRequest};
use crate::ports::progress::{AnalysisProgressNotifier, NoProgress};
use scopelens_domain::{
    AnalysisRequest, AnalysisResult, AnalysisSchema, DomainError, PromptTemplate, SchemaViolation,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// The one message users see for any analysis failure other than bad input
pub const ANALYSIS_FAILURE_MESSAGE: &str =
    "Failed to analyze data. Please check your input or API key.";

/// Errors that can occur during an analysis.
///
/// Each variant keeps its cause for diagnostics; [`user_message`](Self::user_message)
/// collapses them into what the user is shown.
#[derive(Error, Debug)]
pub enum RunAnalysisError {
    #[error("Invalid input: {0}")]
    Validation(#[from] DomainError),

    #[error("API key is not configured")]
    Configuration,

    #[error("No response from the generation service")]
    EmptyResponse,

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(#[from] SchemaViolation),

    #[error("Generation service error: {0}")]
    Service(#[source] GatewayError),
}

impl From<GatewayError> for RunAnalysisError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::MissingCredential => RunAnalysisError::Configuration,
            other => RunAnalysisError::Service(other),
        }
    }
}

impl RunAnalysisError {
    /// Message shown to the user.
    ///
    /// Input problems are specific; everything else is the single
    /// "check your input or API key" category.
    pub fn user_message(&self) -> String {
        match self {
            RunAnalysisError::Validation(e) => e.to_string(),
            _ => ANALYSIS_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Use case for running one analysis.
///
/// 1. Check the credential (no network call without one)
/// 2. Build the prompt and attach the response schema
/// 3. Send exactly one request
/// 4. Validate the body against the schema
pub struct RunAnalysisUseCase {
    gateway: Arc<dyn GenerationGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for RunAnalysisUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl RunAnalysisUseCase {
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

    /// Execute without progress reporting
    pub async fn execute(
        &self,
        request: &AnalysisRequest,
        params: &AnalysisParams,
    ) -> Result<AnalysisResult, RunAnalysisError> {
        self.execute_with_progress(request, params, &NoProgress).await
    }

    /// Execute with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: &AnalysisRequest,
        params: &AnalysisParams,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<AnalysisResult, RunAnalysisError> {
        if !self.gateway.has_credential() {
            error!("Analysis aborted: no API key configured");
            return Err(RunAnalysisError::Configuration);
        }

        let ambition = request.ambition();
        info!(
            "Starting analysis with {} (ambition {}, {} band)",
            params.model,
            ambition,
            ambition.band()
        );

        let prompt = PromptTemplate::analysis_prompt(request, &params.language);
        debug!(
            "Analysis prompt: {} bytes (dataset {} bytes, scope {} bytes)",
            prompt.len(),
            request.dataset_text().len(),
            request.scope_text().len()
        );

        self.conversation_logger.log(ConversationEvent::new(
            "analysis_request",
            serde_json::json!({
                "model": params.model.to_string(),
                "ambition": ambition.value(),
                "band": ambition.band().as_str(),
                "language": params.language.name(),
                "prompt": prompt,
            }),
        ));

        progress.on_analysis_start(params.model.as_str());
        let outcome = self.send(params, prompt).await;
        progress.on_analysis_complete(outcome.is_ok());

        match &outcome {
            Ok(result) => {
                info!(
                    "Analysis completed: \"{}\" ({} insights, {} chart points)",
                    result.title,
                    result.operational_insights.len(),
                    result.chart_data.len()
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "analysis_result",
                    serde_json::to_value(result).unwrap_or_default(),
                ));
            }
            Err(e) => {
                error!("Analysis failed: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "analysis_error",
                    serde_json::json!({ "error": e.to_string() }),
                ));
            }
        }

        outcome
    }

    async fn send(
        &self,
        params: &AnalysisParams,
        prompt: String,
    ) -> Result<AnalysisResult, RunAnalysisError> {
        let call = GenerationRequest::structured(
            params.model.clone(),
            prompt,
            AnalysisSchema::document(),
        );

        let body = self
            .gateway
            .generate(call)
            .await?
            .filter(|text| !text.trim().is_empty())
            .ok_or(RunAnalysisError::EmptyResponse)?;

        Ok(AnalysisSchema::parse(&body)?)
    }
}

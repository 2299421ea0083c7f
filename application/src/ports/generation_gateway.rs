//! Generation Gateway port
//!
//! Defines the interface for calling the external text/JSON generation
//! service. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use scopelens_domain::Model;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during generation gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API key not found in environment variables")]
    MissingCredential,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limited by the generation service")]
    RateLimited,

    #[error("Response blocked by the service's content filter")]
    ContentFiltered,

    #[error("Unreadable service response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// What kind of output the service is asked for
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMode {
    /// Free text
    Text,
    /// JSON conforming to the attached schema document
    Json { schema: Value },
}

/// One outbound generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: Model,
    pub prompt: String,
    pub output: OutputMode,
}

impl GenerationRequest {
    pub fn text(model: Model, prompt: impl Into<String>) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            output: OutputMode::Text,
        }
    }

    pub fn structured(model: Model, prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            output: OutputMode::Json { schema },
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.output, OutputMode::Json { .. })
    }
}

/// Gateway to the generation service
///
/// One call, one attempt: implementations must not retry on their own.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Whether an access credential is configured.
    ///
    /// Side-effect free and cheap; callers use it to disable actions ahead
    /// of time.
    fn has_credential(&self) -> bool;

    /// Send one request.
    ///
    /// `Ok(None)` means the service answered with an empty or absent body.
    async fn generate(&self, request: GenerationRequest) -> Result<Option<String>, GatewayError>;
}

//! Generation Gateway implementation for the Gemini REST API

use super::credential::Credential;
use super::wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scopelens_application::ports::generation_gateway::{
    GatewayError, GenerationGateway, GenerationRequest, OutputMode,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Public Gemini endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Transport settings for [`GeminiGateway`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Generation gateway backed by `models/{model}:generateContent`.
///
/// Every call is a single attempt; the timeout is the client's.
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
    credential: Option<Credential>,
}

impl GeminiGateway {
    /// Create a gateway. Without a credential the gateway still builds but
    /// refuses every call.
    pub fn new(config: GeminiConfig, credential: Option<Credential>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))?;

        match &credential {
            Some(c) => info!("GeminiGateway initialized (key from {})", c.source()),
            None => warn!("GeminiGateway initialized without an API key"),
        }

        Ok(Self {
            client,
            config,
            credential,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    fn body(request: GenerationRequest) -> GenerateContentRequest {
        let generation_config = match request.output {
            OutputMode::Text => None,
            OutputMode::Json { schema } => Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
        };

        GenerateContentRequest {
            contents: vec![Content::user(request.prompt)],
            generation_config,
        }
    }
}

#[async_trait]
impl GenerationGateway for GeminiGateway {
    fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Option<String>, GatewayError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(GatewayError::MissingCredential)?;

        let url = self.endpoint(request.model.as_str());
        debug!(
            model = %request.model,
            prompt_len = request.prompt.len(),
            structured = request.is_structured(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", credential.key())])
            .json(&Self::body(request))
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.without_url().to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.without_url().to_string()))?;

        if parsed.is_blocked() {
            return Err(GatewayError::ContentFiltered);
        }

        let text = parsed.into_text();
        debug!(
            "Gemini API returned {} bytes",
            text.as_ref().map_or(0, String::len)
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopelens_domain::Model;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PATH: &str = "/models/gemini-2.5-flash:generateContent";

    fn gateway(server: &MockServer) -> GeminiGateway {
        GeminiGateway::new(
            GeminiConfig::default().with_base_url(server.uri()),
            Some(Credential::new("test-key", "API_KEY")),
        )
        .unwrap()
    }

    fn reply(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_text_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("hi there")))
            .expect(1)
            .mount(&server)
            .await;

        let text = gateway(&server)
            .generate(GenerationRequest::text(Model::default(), "hello"))
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some("hi there"));

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = requests[0].body_json().unwrap();
        assert!(body.get("generationConfig").is_none());
    }

    #[tokio::test]
    async fn test_structured_request_attaches_schema() {
        let server = MockServer::start().await;
        let schema = json!({"type": "OBJECT", "properties": {"title": {"type": "STRING"}}});
        Mock::given(method("POST"))
            .and(path(PATH))
            .and(body_partial_json(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": schema.clone()
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(r#"{"title":"x"}"#)))
            .expect(1)
            .mount(&server)
            .await;

        let text = gateway(&server)
            .generate(GenerationRequest::structured(Model::default(), "analyze", schema))
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some(r#"{"title":"x"}"#));
    }

    #[tokio::test]
    async fn test_structured_answer_split_over_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [
                        {"text": "{\"title\":"},
                        {"text": "\"x\"}"}
                    ]},
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let schema = json!({"type": "OBJECT"});
        let text = gateway(&server)
            .generate(GenerationRequest::structured(Model::default(), "analyze", schema))
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some(r#"{"title":"x"}"#));
    }

    #[tokio::test]
    async fn test_no_candidates_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let text = gateway(&server)
            .generate(GenerationRequest::text(Model::default(), "hello"))
            .await
            .unwrap();
        assert!(text.is_none());
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let err = gateway(&server)
            .generate(GenerationRequest::text(Model::default(), "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RateLimited));
    }

    #[tokio::test]
    async fn test_server_error_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .expect(1)
            .mount(&server)
            .await;

        let err = gateway(&server)
            .generate(GenerationRequest::text(Model::default(), "hello"))
            .await
            .unwrap_err();
        match err {
            GatewayError::RequestFailed(msg) => assert!(msg.contains("internal")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_safety_block_is_content_filtered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"finishReason": "SAFETY"}]
            })))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .generate(GenerationRequest::text(Model::default(), "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ContentFiltered));
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_content_filtered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "OTHER"}
            })))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .generate(GenerationRequest::text(Model::default(), "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ContentFiltered));
    }

    #[tokio::test]
    async fn test_garbage_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .generate(GenerationRequest::text(Model::default(), "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("never")))
            .expect(0)
            .mount(&server)
            .await;

        let gateway =
            GeminiGateway::new(GeminiConfig::default().with_base_url(server.uri()), None)
                .unwrap();
        assert!(!gateway.has_credential());
        let err = gateway
            .generate(GenerationRequest::text(Model::default(), "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_error() {
        let gateway = GeminiGateway::new(
            GeminiConfig::default()
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(Duration::from_secs(2)),
            Some(Credential::new("k", "API_KEY")),
        )
        .unwrap();

        let err = gateway
            .generate(GenerationRequest::text(Model::default(), "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ConnectionError(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = GeminiGateway::new(
            GeminiConfig::default().with_base_url("http://localhost:1234/v1beta/"),
            None,
        )
        .unwrap();
        assert_eq!(
            gateway.endpoint("gemini-2.5-pro"),
            "http://localhost:1234/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }
}

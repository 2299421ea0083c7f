//! Gemini `generateContent` request/response types

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
                thought: None,
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on reasoning summaries from thinking models; never part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// The prompt itself, or the first candidate, was blocked
    pub fn is_blocked(&self) -> bool {
        let prompt_blocked = self
            .prompt_feedback
            .as_ref()
            .is_some_and(|f| f.block_reason.is_some());
        let candidate_blocked = self
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .is_some_and(|reason| reason == "SAFETY");
        prompt_blocked || candidate_blocked
    }

    /// All answer text parts of the first candidate, concatenated.
    ///
    /// `None` when the candidate carries no text part at all.
    pub fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let mut texts = content
            .parts
            .into_iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text)
            .peekable();
        texts.peek()?;
        Some(texts.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerateContentResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_text_split_across_parts_is_joined() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"title\":"},{"text":"\"x\"}"}]}}]}"#,
        );
        assert_eq!(response.into_text().as_deref(), Some(r#"{"title":"x"}"#));
    }

    #[test]
    fn test_thought_parts_are_skipped() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"พิจารณายอดขาย...","thought":true},
                {"text":"ยอดขายเพิ่มขึ้น"},
                {"text":" 10%"}
            ]}}]}"#,
        );
        assert_eq!(response.into_text().as_deref(), Some("ยอดขายเพิ่มขึ้น 10%"));
    }

    #[test]
    fn test_only_first_candidate_is_read() {
        let response = parse(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"first"}]}},
                {"content":{"parts":[{"text":"second"}]}}
            ]}"#,
        );
        assert_eq!(response.into_text().as_deref(), Some("first"));
    }

    #[test]
    fn test_candidate_without_text_parts_is_none() {
        assert!(parse(r#"{"candidates":[{"content":{"parts":[]}}]}"#).into_text().is_none());
        assert!(parse(r#"{"candidates":[{"finishReason":"STOP"}]}"#).into_text().is_none());
        assert!(
            parse(r#"{"candidates":[{"content":{"parts":[{"text":"x","thought":true}]}}]}"#)
                .into_text()
                .is_none()
        );
    }

    #[test]
    fn test_empty_text_part_is_kept_as_empty_answer() {
        let response = parse(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#);
        assert_eq!(response.into_text().as_deref(), Some(""));
    }
}

//! LLM Client — the single point of entry for all model calls in the service.
//!
//! ARCHITECTURAL RULE: No other module may call the provider API directly.
//! Handlers and the gateway only see the `StructuredGenerator` trait.
//!
//! No retries: a failed call surfaces immediately to the caller.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;
pub mod schema;

use schema::OutputShape;

/// Finish reasons that mean the provider refused to produce output.
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT"];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Provider blocked the request: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Structured generation capability: an instruction plus an output shape in,
/// a JSON object conforming (hopefully) to that shape out.
///
/// Carried in `AppState` as `Arc<dyn StructuredGenerator>`.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    async fn generate_structured(
        &self,
        instruction: &str,
        shape: &OutputShape,
    ) -> Result<Value, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Generative Language API wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiClient
// ────────────────────────────────────────────────────────────────────────────

/// Structured-generation client for the Google Generative Language API.
/// Sends the output shape as `responseSchema` so the model returns typed JSON.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

fn build_request<'a>(instruction: &'a str, shape: &OutputShape) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![RequestPart {
                text: prompts::JSON_ONLY_SYSTEM,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![RequestPart { text: instruction }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: shape.to_response_schema(),
        },
    }
}

#[async_trait]
impl StructuredGenerator for GeminiClient {
    async fn generate_structured(
        &self,
        instruction: &str,
        shape: &OutputShape,
    ) -> Result<Value, LlmError> {
        let request_body = build_request(instruction, shape);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: shape={}, prompt_tokens={}, output_tokens={}",
                shape.name, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        extract_json(&parsed)
    }
}

/// Pulls the JSON object out of a provider response, surfacing blocks and empty output.
fn extract_json(response: &GenerateContentResponse) -> Result<Value, LlmError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone())
    {
        return Err(LlmError::Blocked(reason));
    }

    let Some(text) = response.text() else {
        let finish = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone());
        return match finish {
            Some(reason) if BLOCKING_FINISH_REASONS.contains(&reason.as_str()) => {
                Err(LlmError::Blocked(reason))
            }
            _ => Err(LlmError::EmptyContent),
        };
    };

    // Schema mode should never fence its output, but some models still do.
    serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::schema::FieldSpec;
    use serde_json::json;

    fn response_from(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_request_body_carries_schema_and_instruction() {
        let shape = OutputShape::new("demo", vec![FieldSpec::text("resume", "The resume")]);
        let body = serde_json::to_value(build_request("Tailor this.", &shape)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Tailor this.");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["resume"]["type"],
            "STRING"
        );
    }

    #[test]
    fn test_extract_json_joins_parts() {
        let response = response_from(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"resume\": " }, { "text": "\"R\"}" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 4 }
        }));
        assert_eq!(extract_json(&response).unwrap(), json!({ "resume": "R" }));
    }

    #[test]
    fn test_extract_json_strips_fences() {
        let response = response_from(json!({
            "candidates": [{ "content": { "parts": [{ "text": "```json\n{\"a\": 1}\n```" }] } }]
        }));
        assert_eq!(extract_json(&response).unwrap(), json!({ "a": 1 }));
    }

    #[test]
    fn test_extract_json_reports_prompt_block() {
        let response = response_from(json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        }));
        assert!(matches!(extract_json(&response), Err(LlmError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn test_extract_json_empty_candidates_is_empty_content() {
        let response = response_from(json!({ "candidates": [] }));
        assert!(matches!(extract_json(&response), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_extract_json_safety_finish_is_blocked() {
        let response = response_from(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }));
        assert!(matches!(extract_json(&response), Err(LlmError::Blocked(_))));
    }

    #[test]
    fn test_extract_json_rejects_free_text() {
        let response = response_from(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Sure! Here is your resume." }] } }]
        }));
        assert!(matches!(extract_json(&response), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(
            "key".to_string(),
            "https://example.test/v1beta/".to_string(),
            "gemini-2.5-flash".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}

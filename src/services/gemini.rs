//! Google Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::llm::{LanguageModel, LlmError, LlmErrorKind};
use crate::config::GeminiConfig;

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Pull the first candidate's first text part out of a response body.
pub fn parse_generate_response(body: &str) -> Result<String, LlmError> {
    let data: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::new(LlmErrorKind::Other, format!("JSON parse error: {}", e)))?;

    data.candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts)
        .and_then(|p| p.into_iter().next())
        .and_then(|p| p.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| LlmError::new(LlmErrorKind::EmptyResponse, "No text in model response"))
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    pub fn from_config(config: &GeminiConfig, api_key: &str) -> Self {
        Self::new(api_key.to_string(), config.model.clone(), config.base_url.clone())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::info!(model = %self.model, prompt_chars = prompt.len(), "Sending prompt to Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::new(LlmErrorKind::Network, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::new(LlmErrorKind::Network, e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::from_status(status.as_u16(), &body));
        }

        parse_generate_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_text_part() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Olá"},{"text":"ignored"}]}}]}"#;
        assert_eq!(parse_generate_response(body).unwrap(), "Olá");
    }

    #[test]
    fn test_parse_empty_candidates() {
        let err = parse_generate_response(r#"{"candidates":[]}"#).unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::EmptyResponse);

        let err = parse_generate_response("{}").unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::EmptyResponse);
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_generate_response("<html>").unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::Other);
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(
            "k".to_string(),
            "gemini-2.5-flash".to_string(),
            "https://example.com/v1beta/".to_string(),
        );
        assert_eq!(
            client.endpoint(),
            "https://example.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}

//! Gemini AI provider implementation.
//!
//! Implements text and image+text generation against Google's Gemini
//! `generateContent` REST endpoint.

use super::{GenerativeModel, InlineImage, ProviderError};
use crate::config::GeminiSettings;
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API key, kept out of the URL so it never shows up in error strings.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl From<&GeminiSettings> for GeminiConfig {
    fn from(settings: &GeminiSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

/// Gemini generative model client.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::ClientSetup(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base, self.config.model, method
        )
    }

    async fn generate_content(&self, parts: Vec<ContentPart>) -> Result<String, ProviderError> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            ProviderError::NotConfigured("GEMINI_API_KEY environment variable not set".to_string())
        })?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            part_count = request.contents[0].parts.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        extract_text(api_response)
    }
}

#[async_trait]
impl GenerativeModel for GeminiProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        self.generate_content(vec![ContentPart::Text {
            text: prompt.to_string(),
        }])
        .await
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &InlineImage,
    ) -> Result<String, ProviderError> {
        self.generate_content(vec![
            ContentPart::Text {
                text: prompt.to_string(),
            },
            ContentPart::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: base64::engine::general_purpose::STANDARD.encode(&image.data),
                },
            },
        ])
        .await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        if response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .is_some()
        {
            return Err(ProviderError::ContentFiltered);
        }
        return Err(ProviderError::EmptyResponse);
    };

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(ProviderError::ContentFiltered);
    }

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(text)
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn image_request_serializes_text_then_inline_data() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    ContentPart::Text {
                        text: "describe".to_string(),
                    },
                    ContentPart::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/png".to_string(),
                            data: "AAEC".to_string(),
                        },
                    },
                ],
            }],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "describe" },
                        { "inline_data": { "mimeType": "image/png", "data": "AAEC" } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn text_parts_of_first_candidate_are_joined() {
        let response = parse(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] }, "finishReason": "STOP" },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }));

        assert_eq!(extract_text(response).unwrap(), "Hello, world");
    }

    #[test]
    fn safety_finish_reason_is_content_filtered() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
        }));

        assert_eq!(extract_text(response), Err(ProviderError::ContentFiltered));
    }

    #[test]
    fn blocked_prompt_without_candidates_is_content_filtered() {
        let response = parse(json!({ "promptFeedback": { "blockReason": "OTHER" } }));
        assert_eq!(extract_text(response), Err(ProviderError::ContentFiltered));
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        let response = parse(json!({}));
        assert_eq!(extract_text(response), Err(ProviderError::EmptyResponse));
    }

    #[tokio::test]
    async fn missing_api_key_fails_at_call_time() {
        let provider = GeminiProvider::new(GeminiConfig {
            api_key: None,
            model: "gemini-1.5-flash-latest".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        assert!(!provider.is_configured());
        let err = provider.generate_text("hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}

//! Generative model abstractions and implementations.
//!
//! Handlers talk to a [`GenerativeModel`] trait object so the Gemini backend
//! can be swapped for the scripted mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Content filtered by provider safety settings")]
    ContentFiltered,

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::ClientSetup(_) => "client_setup",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// Image bytes ready to be sent inline to a multimodal model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Text-producing generative model (e.g., Gemini).
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate a reply from a text-only prompt.
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Generate a reply from a prompt accompanied by one image.
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &InlineImage,
    ) -> Result<String, ProviderError>;

    /// Model identifier, used for logging and metric labels.
    fn model_name(&self) -> &str;

    /// Whether a credential was supplied. No network call is made.
    fn is_configured(&self) -> bool;
}

//! Mock provider implementation for testing.

use super::{GenerativeModel, InlineImage, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

type Responder = dyn Fn(&str) -> Result<String, ProviderError> + Send + Sync;

/// One invocation seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

/// Scripted generative model that records every prompt it receives.
pub struct MockProvider {
    responder: Box<Responder>,
    configured: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    /// Reply to every prompt through `responder`.
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String, ProviderError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            configured: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always reply with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::with_responder(move |_| Ok(text.clone()))
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_responder(move |_| Err(error.clone()))
    }

    /// Behaves like a provider started without a credential.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::failing(ProviderError::NotConfigured(
                "GEMINI_API_KEY environment variable not set".to_string(),
            ))
        }
    }

    /// Snapshot of the calls received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, prompt: &str, image: Option<&InlineImage>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                prompt: prompt.to_string(),
                image: image.cloned(),
            });
        }
    }
}

#[async_trait]
impl GenerativeModel for MockProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        self.record(prompt, None);
        (self.responder)(prompt)
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &InlineImage,
    ) -> Result<String, ProviderError> {
        self.record(prompt, Some(image));
        (self.responder)(prompt)
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

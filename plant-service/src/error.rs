//! Failure kinds of the gateway operations.

use crate::services::providers::ProviderError;
use axum::http::StatusCode;
use service_core::error::AppError;
use thiserror::Error;

/// Every way an endpoint call can fail.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or empty input; reported before any outbound call.
    #[error("{0}")]
    Validation(String),

    /// The request body could not be read; `status` comes from the extractor.
    #[error("{message}")]
    Upload { status: StatusCode, message: String },

    #[error("{0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("{0}")]
    Upstream(#[from] ProviderError),

    #[error("{0}")]
    ResponseParse(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation(message.into())
    }

    /// Label used for the `outcome` metric and in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation_error",
            GatewayError::Upload { .. } => "upload_error",
            GatewayError::ImageDecode(_) => "invalid_image",
            GatewayError::Upstream(_) => "upstream_error",
            GatewayError::ResponseParse(_) => "response_parse_error",
            GatewayError::Internal(_) => "internal_error",
        }
    }

    /// Convert into an HTTP error, prefixing server-side failures with `context`.
    pub fn into_app_error(self, context: &str) -> AppError {
        let message = format!("{}: {}", context, self);
        match self {
            GatewayError::Validation(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            GatewayError::Upload { status, message } => AppError::Rejected { status, message },
            GatewayError::ImageDecode(_) => AppError::InvalidImage(message),
            GatewayError::Upstream(_) => AppError::UpstreamError(message),
            GatewayError::ResponseParse(_) => AppError::ResponseParseError(message),
            GatewayError::Internal(_) => AppError::ProcessingError(message),
        }
    }
}

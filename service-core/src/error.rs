use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    /// A client error whose status was decided by the extractor that rejected it.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Response parse error: {0}")]
    ResponseParseError(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    /// Machine-readable failure kind reported alongside 5xx bodies.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            AppError::BadRequest(_) | AppError::Rejected { .. } => None,
            AppError::UpstreamError(_) => Some("upstream_error"),
            AppError::ResponseParseError(_) => Some("response_parse_error"),
            AppError::InvalidImage(_) => Some("invalid_image"),
            AppError::ProcessingError(_) | AppError::InternalError(_) => Some("internal_error"),
            AppError::ConfigError(_) => Some("config_error"),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            kind: Option<&'static str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let kind = self.kind();
        let (status, error_message, details) = match self {
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            AppError::Rejected { status, message } => (status, message, None),
            AppError::UpstreamError(msg)
            | AppError::ResponseParseError(msg)
            | AppError::InvalidImage(msg)
            | AppError::ProcessingError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            AppError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(format!("{:#}", err)),
            ),
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
                Some(err.to_string()),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                kind,
                details,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_body_carries_only_the_message() {
        let response = AppError::BadRequest(anyhow::anyhow!("No file part")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "No file part" }));
    }

    #[tokio::test]
    async fn upstream_error_is_500_with_kind() {
        let response = AppError::UpstreamError("boom".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "boom", "kind": "upstream_error" })
        );
    }

    #[tokio::test]
    async fn parse_and_image_errors_keep_distinct_kinds() {
        let parse = AppError::ResponseParseError("bad json".to_string()).into_response();
        let image = AppError::InvalidImage("bad image".to_string()).into_response();

        assert_eq!(parse.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(image.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(parse).await["kind"], "response_parse_error");
        assert_eq!(body_json(image).await["kind"], "invalid_image");
    }

    #[tokio::test]
    async fn rejected_keeps_its_status() {
        let response = AppError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "length limit exceeded" })
        );
    }

    #[tokio::test]
    async fn processing_error_keeps_its_message() {
        let response = AppError::ProcessingError("task failed".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "task failed", "kind": "internal_error" })
        );
    }
}

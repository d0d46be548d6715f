use crate::error::GatewayError;
use crate::services::diagnosis::{self, ANALYZE_IMAGE};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::{Multipart, State},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;

const ERROR_CONTEXT: &str = "An error occurred during analysis";
/// Multipart field expected to carry the image.
const FILE_FIELD: &str = "file";

/// `POST /analyze-image`: diagnose the uploaded leaf image.
pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let result = match read_file_field(multipart).await {
        Ok(upload) => diagnosis::analyze_leaf(state.model.as_ref(), upload).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(analysis) => {
            metrics::record_request(ANALYZE_IMAGE, "success");
            Ok(Json(analysis))
        }
        Err(e) => {
            metrics::record_request(ANALYZE_IMAGE, e.kind());
            if matches!(e, GatewayError::Validation(_) | GatewayError::Upload { .. }) {
                tracing::info!(error = %e, "Rejected /analyze-image request");
            } else {
                tracing::error!(error = %e, kind = e.kind(), "Error in /analyze-image");
            }
            Err(e.into_app_error(ERROR_CONTEXT))
        }
    }
}

/// Pull the bytes of the `file` part out of the form.
///
/// A part only counts as a file when it carries a filename; an empty
/// filename means the user submitted the form without choosing one.
async fn read_file_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<u8>, GatewayError> {
    let Ok(mut multipart) = multipart else {
        return Err(GatewayError::validation("No file part"));
    };

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        if file_name.is_empty() {
            return Err(GatewayError::validation("No selected file"));
        }

        let data = field.bytes().await.map_err(upload_error)?;

        tracing::info!(file_name = %file_name, size = data.len(), "Received image upload");
        return Ok(data.to_vec());
    }

    Err(GatewayError::validation("No file part"))
}

/// Keep the status axum assigns, e.g. 413 once the body limit is hit.
fn upload_error(err: MultipartError) -> GatewayError {
    GatewayError::Upload {
        status: err.status(),
        message: err.body_text(),
    }
}

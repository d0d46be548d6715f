//! The two model-backed operations, independent of HTTP.

use crate::error::GatewayError;
use crate::services::leaf_image::decode_upload;
use crate::services::metrics;
use crate::services::prompts::{treatment_plan_prompt, IMAGE_ANALYSIS_PROMPT};
use crate::services::providers::{GenerativeModel, ProviderError};
use crate::services::reply::parse_json_reply;
use serde_json::Value;
use std::time::Instant;

pub const ANALYZE_IMAGE: &str = "analyze_image";
pub const TREATMENT_PLAN: &str = "treatment_plan";

/// Decode `upload`, ask the model to diagnose it and parse the JSON verdict.
pub async fn analyze_leaf(
    model: &dyn GenerativeModel,
    upload: Vec<u8>,
) -> Result<Value, GatewayError> {
    // Decoding is CPU-bound; keep it off the async workers.
    let image = tokio::task::spawn_blocking(move || decode_upload(&upload))
        .await
        .map_err(|e| GatewayError::Internal(format!("image decoding task failed: {}", e)))??;

    tracing::debug!(
        mime_type = %image.mime_type,
        inline_bytes = image.data.len(),
        "Prepared uploaded image"
    );

    let started = Instant::now();
    let reply = model.generate_with_image(IMAGE_ANALYSIS_PROMPT, &image).await;
    let reply = observe_provider_call(ANALYZE_IMAGE, model.model_name(), started, reply)?;

    Ok(parse_json_reply(&reply)?)
}

/// Ask the model for a treatment plan. The reply text is returned untouched.
pub async fn draft_treatment_plan(
    model: &dyn GenerativeModel,
    disease_name: &str,
) -> Result<String, GatewayError> {
    let prompt = treatment_plan_prompt(disease_name);

    let started = Instant::now();
    let reply = model.generate_text(&prompt).await;
    Ok(observe_provider_call(
        TREATMENT_PLAN,
        model.model_name(),
        started,
        reply,
    )?)
}

fn observe_provider_call(
    operation: &str,
    model: &str,
    started: Instant,
    reply: Result<String, ProviderError>,
) -> Result<String, ProviderError> {
    let elapsed = started.elapsed().as_secs_f64();
    metrics::record_provider_latency(operation, model, elapsed);

    match &reply {
        Ok(text) => tracing::info!(
            operation,
            model,
            elapsed_secs = elapsed,
            reply_len = text.len(),
            "Model call completed"
        ),
        Err(e) => {
            metrics::record_provider_error(operation, e.error_type());
            tracing::warn!(operation, model, error = %e, "Model call failed");
        }
    }

    reply
}

use crate::services::metrics::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde_json::json;

/// Liveness check. Reports whether a model credential was configured
/// without calling the provider.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "plant-service",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.model.model_name(),
        "model_configured": state.model.is_configured(),
    }))
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        get_metrics(),
    )
}

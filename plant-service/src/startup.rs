//! Application startup and lifecycle management.

use crate::config::PlantConfig;
use crate::handlers::{analyze_image, get_treatment_plan, health_check, metrics};
use crate::services::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::services::providers::GenerativeModel;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, security_headers_middleware, RequestId};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: PlantConfig,
    pub model: Arc<dyn GenerativeModel>,
}

impl AppState {
    pub fn new(config: PlantConfig, model: Arc<dyn GenerativeModel>) -> Self {
        Self { config, model }
    }
}

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.limits.max_upload_bytes;

    Router::new()
        .route("/analyze-image", post(analyze_image))
        .route("/get-treatment-plan", post(get_treatment_plan))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        // The browser frontend is hosted elsewhere; any origin may call us.
        .layer(CorsLayer::permissive())
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    request_id = %RequestId::of(request),
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application backed by the Gemini provider.
    pub async fn build(config: PlantConfig) -> Result<Self, AppError> {
        if config.gemini.api_key.is_none() {
            // Keep serving; model-backed endpoints fail per request until a key is supplied.
            tracing::error!(
                "CRITICAL: GEMINI_API_KEY environment variable not set. \
                 Model-backed endpoints will fail until it is configured."
            );
        }

        let provider = GeminiProvider::new(GeminiConfig::from(&config.gemini))
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(
            model = %config.gemini.model,
            configured = config.gemini.api_key.is_some(),
            "Initialized Gemini provider"
        );

        Self::build_with_model(config, Arc::new(provider)).await
    }

    /// Build the application around an already constructed model.
    pub async fn build_with_model(
        config: PlantConfig,
        model: Arc<dyn GenerativeModel>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Plant service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, model),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

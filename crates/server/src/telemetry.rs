use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

/// Initialize JSON logging on stderr. Level defaults to INFO, `RUST_LOG` overrides.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to install Prometheus metrics recorder: {0}")]
    Recorder(String),

    #[error("Failed to bind metrics listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// Shared state for the metrics endpoint.
struct AppState {
    metrics_handle: PrometheusHandle,
}

/// Install the Prometheus recorder and serve `/health` and `/metrics`
/// on localhost in the background. Returns the bound address.
pub async fn spawn_metrics_server(port: u16) -> Result<SocketAddr, TelemetryError> {
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| TelemetryError::Recorder(e.to_string()))?;

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    let addr = listener.local_addr()?;

    let app = router(Arc::new(AppState { metrics_handle }));

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Metrics server stopped");
        }
    });

    tracing::info!(%addr, "Metrics endpoint listening");
    Ok(addr)
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "healthy" })),
    )
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}

//! HTTP surface of the inference service (subset of the V2 inference protocol).

pub mod handlers;
mod types;

pub use handlers::AppState;
pub use types::*;

use crate::{
    Result,
    config::Config,
    model::{OcrModel, PredictMetrics, TesseractRecognizer},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Largest accepted request envelope; base64 inflates a 20 MiB upload to under 27 MiB.
pub const MAX_REQUEST_BYTES: usize = 32 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v2/models/:model_name/infer", post(handlers::infer))
        .route("/v2/models/:model_name/ready", get(handlers::model_ready))
        .route("/v2/models/:model_name", get(handlers::model_metadata))
        .route("/v2/health/live", get(handlers::live))
        .route("/v2/health/ready", get(handlers::ready))
        .route("/metrics", get(handlers::metrics))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let metrics = PredictMetrics::new()?;
    let recognizer = TesseractRecognizer::new(config.model.tesseract.clone());
    let model = OcrModel::new(config.model.name.clone(), Arc::new(recognizer), metrics.clone());

    let app = router(AppState {
        model: Arc::new(model),
        metrics,
    });

    let addr = SocketAddr::new(config.model.host.parse()?, config.model.port);

    info!("Serving model {} on {}", config.model.name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

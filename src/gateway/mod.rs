//! Front-door service turning image uploads into inference envelopes.

mod client;
mod error;
pub mod handlers;
mod types;

pub use client::{BackendReply, HttpInferenceClient, InferenceClient};
pub use error::GatewayError;
pub use handlers::AppState;
pub use types::*;

use crate::{Result, config::Config};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/gateway/ocr", post(handlers::ocr))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let client = HttpInferenceClient::new(&config.gateway)?;

    info!("Forwarding OCR requests to {}", client.endpoint());

    let app = router(AppState {
        client: Arc::new(client),
    });

    let addr = SocketAddr::new(config.gateway.host.parse()?, config.gateway.port);

    info!("Starting gateway on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

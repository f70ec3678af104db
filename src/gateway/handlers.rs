use super::{GatewayError, InferenceClient, types::HealthResponse};
use crate::protocol::InferenceRequest;
use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::info;

/// Multipart field holding the uploaded image.
pub const UPLOAD_FIELD: &str = "image_file";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn InferenceClient>,
}

pub async fn ocr(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, GatewayError> {
    let (file_name, content_type, payload) = loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| GatewayError::UploadRead(e.body_text()))?
            .ok_or_else(|| GatewayError::MissingUpload(UPLOAD_FIELD.to_string()))?;

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        let payload = field
            .bytes()
            .await
            .map_err(|e| GatewayError::UploadRead(e.body_text()))?;

        break (file_name, content_type, payload);
    };

    info!(
        "Received upload '{}' ({}, {} bytes)",
        file_name,
        content_type,
        payload.len()
    );

    let request = InferenceRequest::for_image(&payload, content_type);
    let reply = state.client.infer(&request).await?;

    info!("Inference service answered {}", reply.status);

    let content_type = reply
        .content_type
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    Ok((
        reply.status,
        [(header::CONTENT_TYPE, content_type)],
        Body::from(reply.body),
    )
        .into_response())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

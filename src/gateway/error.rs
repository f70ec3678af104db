use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use super::types::ErrorDetail;

/// Failures of one `/gateway/ocr` call, classified for status mapping.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing upload field: {0}")]
    MissingUpload(String),

    #[error("Failed to read upload: {0}")]
    UploadRead(String),

    #[error("Inference service returned {status}")]
    Backend {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },

    #[error("Inference service did not respond within {0} seconds")]
    BackendTimeout(u64),

    #[error("Inference service unreachable: {0}")]
    BackendUnreachable(String),

    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Status the gateway answers with for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingUpload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UploadRead(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Backend { status, .. } => *status,
            Self::BackendTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::BackendUnreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            Self::Backend {
                status,
                content_type,
                body,
            } => {
                warn!("Relaying inference service error status {}", status);
                let mut response = (status, Body::from(body)).into_response();
                if let Some(content_type) = content_type {
                    response
                        .headers_mut()
                        .insert(header::CONTENT_TYPE, content_type);
                }
                response
            }
            other => {
                error!("Gateway request failed: {}", other);
                (
                    status,
                    Json(ErrorDetail {
                        detail: other.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            GatewayError::MissingUpload("image_file".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            GatewayError::UploadRead("eof".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::BackendTimeout(30).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            GatewayError::BackendUnreachable("refused".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::Backend {
                status: StatusCode::SERVICE_UNAVAILABLE,
                content_type: None,
                body: Bytes::new(),
            }
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}

use async_trait::async_trait;
use axum::{
    body::Bytes,
    http::{HeaderValue, StatusCode, header},
};
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

use super::GatewayError;
use crate::{
    Result,
    config::GatewayConfig,
    protocol::{InferenceRequest, InferenceResponse},
};

/// A successful reply from the inference service, kept as received.
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn infer(&self, request: &InferenceRequest) -> std::result::Result<BackendReply, GatewayError>;
}

/// Posts envelopes as JSON to one configured inference endpoint.
pub struct HttpInferenceClient {
    endpoint: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpInferenceClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let timeout = config.timeout();
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        debug!(
            "Inference client targeting {} with {}s timeout",
            endpoint,
            timeout.as_secs()
        );

        Ok(Self {
            endpoint,
            timeout,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn classify(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::BackendTimeout(self.timeout.as_secs())
        } else if e.is_connect() {
            GatewayError::BackendUnreachable(e.to_string())
        } else {
            GatewayError::internal(format!("Request to inference service failed: {}", e))
        }
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn infer(&self, request: &InferenceRequest) -> std::result::Result<BackendReply, GatewayError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| GatewayError::internal(format!("Failed to serialize request: {}", e)))?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        debug!(
            "Inference service answered {} with {} bytes",
            status,
            body.len()
        );

        if status != StatusCode::OK {
            return Err(GatewayError::Backend {
                status,
                content_type,
                body,
            });
        }

        serde_json::from_slice::<InferenceResponse>(&body).map_err(|e| {
            GatewayError::internal(format!("Malformed inference response: {}", e))
        })?;

        Ok(BackendReply {
            status,
            content_type,
            body,
        })
    }
}

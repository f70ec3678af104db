use super::types::{
    ErrorResponse, LiveResponse, ModelMetadataResponse, ModelReadyResponse, ReadyResponse,
    TensorMetadata,
};
use crate::{
    model::{PredictError, PredictMetrics, Predictor},
    protocol::{BYTES_DATATYPE, INPUT_TENSOR_NAME, InferenceRequest, InferenceResponse, OUTPUT_TENSOR_NAME},
};
use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn Predictor>,
    pub metrics: PredictMetrics,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = match self {
            PredictError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

fn model_not_found(name: &str) -> ApiError {
    warn!("Request for unknown model: {}", name);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Model with name {} does not exist.", name),
        }),
    )
}

fn ensure_model<'a>(state: &'a AppState, name: &str) -> Result<&'a dyn Predictor, ApiError> {
    if state.model.name() == name {
        Ok(state.model.as_ref())
    } else {
        Err(model_not_found(name))
    }
}

pub async fn infer(
    State(state): State<AppState>,
    Path(model_name): Path<String>,
    Json(request): Json<InferenceRequest>,
) -> Result<Json<InferenceResponse>, Response> {
    let model = ensure_model(&state, &model_name).map_err(IntoResponse::into_response)?;

    info!(
        "Received inference request for model {} with {} input(s)",
        model_name,
        request.inputs.len()
    );

    model
        .predict(request)
        .await
        .map(Json)
        .map_err(IntoResponse::into_response)
}

pub async fn model_metadata(
    State(state): State<AppState>,
    Path(model_name): Path<String>,
) -> Result<Json<ModelMetadataResponse>, ApiError> {
    let model = ensure_model(&state, &model_name)?;

    Ok(Json(ModelMetadataResponse {
        name: model.name().to_string(),
        versions: vec![],
        platform: "",
        inputs: vec![TensorMetadata {
            name: INPUT_TENSOR_NAME,
            datatype: BYTES_DATATYPE,
            shape: vec![1],
        }],
        outputs: vec![TensorMetadata {
            name: OUTPUT_TENSOR_NAME,
            datatype: BYTES_DATATYPE,
            shape: vec![1],
        }],
    }))
}

pub async fn model_ready(
    State(state): State<AppState>,
    Path(model_name): Path<String>,
) -> Result<Json<ModelReadyResponse>, ApiError> {
    let model = ensure_model(&state, &model_name)?;

    Ok(Json(ModelReadyResponse {
        name: model.name().to_string(),
        ready: model.is_ready(),
    }))
}

pub async fn live() -> Json<LiveResponse> {
    Json(LiveResponse { live: true })
}

pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    Json(ReadyResponse {
        ready: state.model.is_ready(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

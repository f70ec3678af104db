use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::codec::encode_payload;

/// Datatype tag for opaque byte payloads.
pub const BYTES_DATATYPE: &str = "BYTES";
pub const INPUT_TENSOR_NAME: &str = "input-0";
pub const OUTPUT_TENSOR_NAME: &str = "output-0";
/// Parameter key carrying the upload's MIME type.
pub const CONTENT_TYPE_PARAMETER: &str = "content_type";

/// A named, shaped data slot inside an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    pub name: String,
    pub shape: Vec<i64>,
    pub datatype: String,
    pub data: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<HashMap<String, String>>,
}

impl Tensor {
    /// Single-element `BYTES` tensor of shape `[1]`.
    pub fn bytes(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: vec![1],
            datatype: BYTES_DATATYPE.to_string(),
            data: vec![value.into()],
            parameters: None,
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.as_ref()?.get(key).map(String::as_str)
    }

    pub fn first_value(&self) -> Option<&str> {
        self.data.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub inputs: Vec<Tensor>,
}

impl InferenceRequest {
    /// Wraps a raw upload as the base64 payload of `input-0`.
    pub fn for_image(payload: &[u8], content_type: impl Into<String>) -> Self {
        let tensor = Tensor::bytes(INPUT_TENSOR_NAME, encode_payload(payload))
            .with_parameter(CONTENT_TYPE_PARAMETER, content_type);

        Self {
            id: None,
            inputs: vec![tensor],
        }
    }

    /// First data element of the first input tensor.
    pub fn first_payload(&self) -> Option<&str> {
        self.inputs.first()?.first_value()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(rename = "id", alias = "response_id")]
    pub response_id: String,
    #[serde(rename = "outputs", alias = "infer_outputs")]
    pub infer_outputs: Vec<Tensor>,
}

impl InferenceResponse {
    /// Response carrying `text` as `output-0`, stamped with a fresh id.
    pub fn text(model_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            model_version: None,
            response_id: Uuid::new_v4().to_string(),
            infer_outputs: vec![Tensor::bytes(OUTPUT_TENSOR_NAME, text)],
        }
    }

    pub fn first_text(&self) -> Option<&str> {
        self.infer_outputs.first()?.first_value()
    }
}

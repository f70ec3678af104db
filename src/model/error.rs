use thiserror::Error;

/// Failures raised inside a predict call.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to decode base64 payload: {0}")]
    Base64Decode(#[from] crate::protocol::DecodeError),

    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Text extraction failed: {0}")]
    Extraction(String),
}

impl PredictError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }
}

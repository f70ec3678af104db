use async_trait::async_trait;
use std::{sync::Arc, time::Instant};
use tracing::{debug, error, info};

use super::{Outcome, PredictError, PredictMetrics, TextRecognizer};
use crate::protocol::{InferenceRequest, InferenceResponse, decode_payload};

/// A servable model: one predict contract plus its identity.
#[async_trait]
pub trait Predictor: Send + Sync {
    fn name(&self) -> &str;

    /// Always true once constructed; there is no load/unload cycle.
    fn is_ready(&self) -> bool {
        true
    }

    async fn predict(&self, request: InferenceRequest) -> Result<InferenceResponse, PredictError>;
}

/// Extracts text from the image carried in the first input tensor.
pub struct OcrModel {
    name: String,
    recognizer: Arc<dyn TextRecognizer>,
    metrics: PredictMetrics,
}

impl OcrModel {
    pub fn new(
        name: impl Into<String>,
        recognizer: Arc<dyn TextRecognizer>,
        metrics: PredictMetrics,
    ) -> Self {
        Self {
            name: name.into(),
            recognizer,
            metrics,
        }
    }

    pub fn metrics(&self) -> &PredictMetrics {
        &self.metrics
    }

    async fn extract(&self, request: &InferenceRequest) -> Result<String, PredictError> {
        let encoded = request
            .first_payload()
            .ok_or_else(|| PredictError::invalid_input("request has no input tensor data"))?;

        let image_data = decode_payload(encoded)?;
        let image = image::load_from_memory(&image_data)?;

        debug!(
            "Decoded {}x{} image from {} bytes",
            image.width(),
            image.height(),
            image_data.len()
        );

        self.recognizer.recognize(&image).await
    }
}

#[async_trait]
impl Predictor for OcrModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn predict(&self, request: InferenceRequest) -> Result<InferenceResponse, PredictError> {
        let start = Instant::now();
        let result = self.extract(&request).await;

        let outcome = match &result {
            Ok(_) => Outcome::Success,
            Err(_) => Outcome::Error,
        };
        self.metrics.record(outcome, start.elapsed());

        match result {
            Ok(text) => {
                let response = InferenceResponse::text(&self.name, text);
                info!("Predict succeeded, response id: {}", response.response_id);
                Ok(response)
            }
            Err(e) => {
                error!("Predict failed for model {}: {}", self.name, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Tensor, encode_payload};
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    struct EchoDimensions;

    #[async_trait]
    impl TextRecognizer for EchoDimensions {
        async fn recognize(&self, image: &DynamicImage) -> Result<String, PredictError> {
            Ok(format!("{}x{}", image.width(), image.height()))
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Vec::new();
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn model() -> OcrModel {
        OcrModel::new(
            "ocr-model",
            Arc::new(EchoDimensions),
            PredictMetrics::new().unwrap(),
        )
    }

    #[tokio::test]
    async fn predict_returns_single_output() {
        let model = model();
        let request = InferenceRequest::for_image(&png_bytes(3, 2), "image/png");

        let response = model.predict(request).await.unwrap();

        assert_eq!(response.model_name, "ocr-model");
        assert_eq!(response.infer_outputs.len(), 1);
        assert_eq!(response.infer_outputs[0].name, "output-0");
        assert_eq!(response.first_text(), Some("3x2"));
        assert_eq!(model.metrics().count(Outcome::Success), 1);
        assert_eq!(model.metrics().latency_samples(), 1);
    }

    #[tokio::test]
    async fn empty_inputs_are_invalid() {
        let model = model();
        let request = InferenceRequest {
            id: None,
            inputs: vec![],
        };

        let err = model.predict(request).await.unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
        assert_eq!(model.metrics().count(Outcome::Error), 1);
    }

    #[tokio::test]
    async fn bad_base64_counts_as_error() {
        let model = model();
        let request = InferenceRequest {
            id: None,
            inputs: vec![Tensor::bytes("input-0", "%%%")],
        };

        let err = model.predict(request).await.unwrap_err();
        assert!(matches!(err, PredictError::Base64Decode(_)));
        assert_eq!(model.metrics().count(Outcome::Error), 1);
        assert_eq!(model.metrics().count(Outcome::Success), 0);
    }

    #[tokio::test]
    async fn line_wrapped_payload_is_decoded() {
        let model = model();
        let encoded = encode_payload(&png_bytes(40, 40));
        let wrapped = encoded
            .as_bytes()
            .chunks(76)
            .map(|line| std::str::from_utf8(line).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        let request = InferenceRequest {
            id: None,
            inputs: vec![Tensor::bytes("input-0", wrapped)],
        };

        let response = model.predict(request).await.unwrap();
        assert_eq!(response.first_text(), Some("40x40"));
        assert_eq!(model.metrics().count(Outcome::Success), 1);
        assert_eq!(model.metrics().count(Outcome::Error), 0);
    }

    #[tokio::test]
    async fn non_image_payload_is_image_decode_error() {
        let model = model();
        let request = InferenceRequest {
            id: None,
            inputs: vec![Tensor::bytes("input-0", encode_payload(b"plain text"))],
        };

        let err = model.predict(request).await.unwrap_err();
        assert!(matches!(err, PredictError::ImageDecode(_)));
        assert_eq!(model.metrics().count(Outcome::Error), 1);
        assert_eq!(model.metrics().latency_samples(), 0);
    }
}

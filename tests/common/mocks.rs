use async_trait::async_trait;
use image::DynamicImage;
use ocr_serving::{
    gateway::{BackendReply, GatewayError, InferenceClient},
    model::{PredictError, TextRecognizer},
    protocol::InferenceRequest,
};
use std::sync::{Arc, Mutex};

/// Mock recogniser that reports the image dimensions as its "text"
#[derive(Debug, Default)]
pub struct MockRecognizer {
    pub error: Option<String>,
    pub calls: Arc<Mutex<usize>>,
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TextRecognizer for MockRecognizer {
    async fn recognize(&self, image: &DynamicImage) -> Result<String, PredictError> {
        *self.calls.lock().unwrap() += 1;

        if let Some(ref error) = self.error {
            return Err(PredictError::extraction(error.clone()));
        }

        Ok(format!("text {}x{}", image.width(), image.height()))
    }
}

/// Mock inference client recording every envelope it is asked to send
pub struct MockInferenceClient {
    pub requests: Arc<Mutex<Vec<InferenceRequest>>>,
    pub reply: Box<dyn Fn() -> Result<BackendReply, GatewayError> + Send + Sync>,
}

impl MockInferenceClient {
    pub fn replying(reply: impl Fn() -> Result<BackendReply, GatewayError> + Send + Sync + 'static) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Box::new(reply),
        }
    }

    pub fn get_requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn infer(&self, request: &InferenceRequest) -> Result<BackendReply, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.reply)()
    }
}

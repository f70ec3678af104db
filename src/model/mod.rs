mod error;
pub mod metrics;
mod predictor;
mod recognizer;

pub use error::PredictError;
pub use metrics::{Outcome, PredictMetrics};
pub use predictor::{OcrModel, Predictor};
pub use recognizer::{TesseractRecognizer, TextRecognizer};

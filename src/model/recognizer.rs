use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use std::{io::Cursor, process::Stdio};
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::debug;

use super::PredictError;
use crate::config::TesseractConfig;

/// Turns a decoded image into the text it contains.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &DynamicImage) -> Result<String, PredictError>;
}

/// Runs the `tesseract` CLI, feeding the image as PNG on stdin and reading text from stdout.
pub struct TesseractRecognizer {
    command: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(config: TesseractConfig) -> Self {
        Self {
            command: config.command,
            language: config.language,
        }
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &DynamicImage) -> Result<String, PredictError> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| PredictError::extraction(format!("Failed to re-encode image: {}", e)))?;

        debug!(
            "Running {} on {}x{} image ({} bytes)",
            self.command,
            image.width(),
            image.height(),
            png.len()
        );

        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", self.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                PredictError::extraction(format!("Failed to spawn {}: {}", self.command, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| PredictError::extraction("Failed to open tesseract stdin"))?;
        // Tesseract may exit before reading everything, e.g. on a missing language pack
        let write_result = stdin.write_all(&png).await;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| PredictError::extraction(format!("Failed to wait for tesseract: {}", e)))?;

        if let Err(e) = write_result {
            return Err(PredictError::extraction(format!(
                "Failed to write image to {} ({}): {}",
                self.command,
                e,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        if !output.status.success() {
            return Err(PredictError::extraction(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    /// Full URL of the inference endpoint, e.g. `http://localhost:8080/v2/models/ocr-model/infer`.
    #[serde(default = "default_inference_url")]
    pub inference_url: String,
    /// Upper bound on one call to the inference service.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_model_port")]
    pub port: u16,
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default)]
    pub tesseract: TesseractConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TesseractConfig {
    #[serde(default = "default_tesseract_command")]
    pub command: String,
    #[serde(default = "default_tesseract_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_gateway_port(),
            inference_url: default_inference_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_model_port(),
            name: default_model_name(),
            tesseract: TesseractConfig::default(),
        }
    }
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            command: default_tesseract_command(),
            language: default_tesseract_language(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_gateway_port() -> u16 {
    8001
}

fn default_model_port() -> u16 {
    8080
}

fn default_inference_url() -> String {
    "http://localhost:8080/v2/models/ocr-model/infer".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_model_name() -> String {
    "ocr-model".to_string()
}

fn default_tesseract_command() -> String {
    "tesseract".to_string()
}

fn default_tesseract_language() -> String {
    "eng".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

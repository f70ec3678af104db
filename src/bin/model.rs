use anyhow::Result;
use ocr_serving::{config, inference, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = match telemetry::init(&config.logs.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting inference service for model {} with log level: {}",
        config.model.name, log_level
    );

    inference::run(config).await?;

    Ok(())
}

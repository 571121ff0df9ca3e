use anyhow::Result;
use bookshelf_relay::{config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup); this also checks the log level
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG takes precedence over the configured level
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.logs.level)),
        )
        .json()
        .init();

    info!("Starting bookshelf relay with log level: {}", log_level);
    info!("Configuration loaded successfully");

    let relay = server::build_relay(&config).await?;
    server::run(config, relay).await?;

    Ok(())
}

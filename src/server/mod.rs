pub mod handlers;
pub mod types;

use crate::{Result, config::Config, gemini::GeminiClient, relay::ImageRelay};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use handlers::AppState;

pub fn router(state: AppState, max_upload_bytes: Option<usize>) -> Router {
    let body_limit = match max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/image", post(handlers::analyze_image))
        .layer(body_limit)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the relay with one pooled Gemini client shared by every request.
pub async fn build_relay(config: &Config) -> Result<ImageRelay> {
    let client = GeminiClient::new(&config.gemini)?;

    let staging_dir = config.server.staging_dir();
    tokio::fs::create_dir_all(&staging_dir).await?;
    info!("Staging uploads in {}", staging_dir.display());

    Ok(ImageRelay::new(
        Arc::new(client),
        config.gemini.model.clone(),
        staging_dir,
    ))
}

pub async fn run(config: Config, relay: ImageRelay) -> Result<()> {
    info!("Relaying images to model {}", relay.model());

    let app_state = AppState {
        relay: Arc::new(relay),
    };
    let app = router(app_state, config.server.max_upload_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

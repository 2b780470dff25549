//! Textchunk Service - Main Entry Point
//!
//! HTTP service exposing the chunking engine.

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use textchunk::api::handlers::{self, AppState};
use textchunk::engine::ChunkingEngine;
use textchunk::types::ServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "textchunk=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = ServiceConfig::from_env();

    info!("Starting Textchunk Service v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Default chunk size: {} chars, overlap: {} chars",
        config.default_chunk_size, config.default_chunk_overlap
    );

    // Initialize the engine
    let engine = ChunkingEngine::new(config.chunker_defaults());

    let state = Arc::new(AppState {
        engine,
        started_at: Utc::now(),
    });

    // Build HTTP routes
    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Chunking
        .route("/chunk", post(handlers::split))
        .route("/chunk/strategies", get(handlers::list_strategies))
        .route("/chunk/defaults", get(handlers::get_defaults))
        // Analysis
        .route("/chunk/stats", post(handlers::compute_stats))
        .route("/chunk/validate", post(handlers::validate))
        // State
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! HTTP request handlers for the chunking service.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::{ChunkStats, ValidationReport};
use crate::engine::{ChunkingEngine, Strategy};
use crate::error::ChunkError;
use crate::types::{chunks_from_texts, Chunk, ChunkOverrides};

/// Application state shared across handlers.
pub struct AppState {
    pub engine: ChunkingEngine,
    pub started_at: DateTime<Utc>,
}

type ApiError = (StatusCode, String);

fn into_api_error(err: ChunkError) -> ApiError {
    let status = match err {
        ChunkError::InvalidConfig(_) | ChunkError::EmptyInput => StatusCode::BAD_REQUEST,
        ChunkError::ExternalSplitter(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    started_at: DateTime<Utc>,
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at,
    })
}

/// Split request.
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    pub text: String,
    /// Strategy name or alias; defaults to sentence splitting
    pub strategy: Option<String>,
    pub chunk_size: Option<usize>,
    pub chunk_overlap: Option<usize>,
    pub separators: Option<Vec<String>>,
}

/// Split response.
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    pub strategy: &'static str,
    pub total_chunks: usize,
    pub chunks: Vec<Chunk>,
}

/// Split text with the requested strategy.
pub async fn split(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SplitRequest>,
) -> Result<Json<SplitResponse>, ApiError> {
    let strategy = match &request.strategy {
        Some(name) => Strategy::parse(name).ok_or((
            StatusCode::BAD_REQUEST,
            format!("unknown strategy: {name}"),
        ))?,
        None => Strategy::Sentence,
    };

    let overrides = ChunkOverrides {
        chunk_size: request.chunk_size,
        chunk_overlap: request.chunk_overlap,
        separators: request.separators,
    };

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        strategy = strategy.name(),
        chars = request.text.chars().count(),
        "received split request"
    );

    let chunks = state
        .engine
        .split(strategy, &request.text, Some(&overrides))
        .map_err(into_api_error)?;

    Ok(Json(SplitResponse {
        strategy: strategy.name(),
        total_chunks: chunks.len(),
        chunks,
    }))
}

/// Strategy listing entry.
#[derive(Debug, Serialize)]
pub struct StrategyInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// List available strategies.
pub async fn list_strategies(State(state): State<Arc<AppState>>) -> Json<Vec<StrategyInfo>> {
    Json(
        state
            .engine
            .list_strategies()
            .into_iter()
            .map(|(name, description)| StrategyInfo { name, description })
            .collect(),
    )
}

/// Default configuration response.
#[derive(Debug, Serialize)]
pub struct DefaultsResponse {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub separators: Vec<String>,
}

/// Get the engine's default configuration.
pub async fn get_defaults(State(state): State<Arc<AppState>>) -> Json<DefaultsResponse> {
    let defaults = state.engine.defaults();
    Json(DefaultsResponse {
        chunk_size: defaults.chunk_size,
        chunk_overlap: defaults.chunk_overlap,
        separators: defaults.separators.clone(),
    })
}

/// Statistics request.
#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    pub chunks: Vec<String>,
}

/// Compute statistics over submitted chunks.
pub async fn compute_stats(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StatsRequest>,
) -> Result<Json<ChunkStats>, ApiError> {
    let chunks = chunks_from_texts(request.chunks);
    let stats = state.engine.compute_stats(&chunks).map_err(into_api_error)?;
    Ok(Json(stats))
}

/// Validation request.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub chunks: Vec<String>,
    pub max_size: usize,
}

/// Validate submitted chunks against a size bound.
pub async fn validate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ValidateRequest>,
) -> Json<ValidationReport> {
    let chunks = chunks_from_texts(request.chunks);
    Json(state.engine.validate(&chunks, request.max_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let state = Arc::new(AppState {
            engine: ChunkingEngine::default(),
            started_at: Utc::now(),
        });
        Router::new()
            .route("/chunk", post(split))
            .route("/chunk/validate", post(validate))
            .with_state(state)
    }

    async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_split_round_trip() {
        let body = serde_json::json!({
            "text": "abcdefghij",
            "strategy": "equal_size",
            "chunk_size": 4,
            "chunk_overlap": 1,
        });
        let (status, bytes) = post_json(test_app(), "/chunk", body).await;
        assert_eq!(status, StatusCode::OK);

        let response: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(response["total_chunks"], 4);
        assert_eq!(response["chunks"][0]["content"], "abcd");
        assert_eq!(response["chunks"][3]["content"], "j");
    }

    #[tokio::test]
    async fn test_split_rejects_invalid_config() {
        let body = serde_json::json!({
            "text": "abcdefghij",
            "strategy": "equal_size",
            "chunk_size": 4,
            "chunk_overlap": 4,
        });
        let (status, _) = post_json(test_app(), "/chunk", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_split_rejects_unknown_strategy() {
        let body = serde_json::json!({ "text": "abc", "strategy": "quantum" });
        let (status, _) = post_json(test_app(), "/chunk", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validate_round_trip() {
        let body = serde_json::json!({ "chunks": ["ab", "abcdef"], "max_size": 3 });
        let (status, bytes) = post_json(test_app(), "/chunk/validate", body).await;
        assert_eq!(status, StatusCode::OK);

        let report: ValidationReport = serde_json::from_slice(&bytes).unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.oversized_indices, vec![1]);
    }
}

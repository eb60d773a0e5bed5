//! Request handlers

use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use swarm_core::TradingState;
use tracing::info;

use crate::server::dto::{AnalyzeRequest, AnalyzeResponse, HealthResponse};
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// `POST /analyze` - run the full swarm against a free-text query
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Query cannot be empty".to_string()));
    }

    let graph = state.graph_for(request.api_key.as_deref())?;

    info!(query, "analysis request accepted");
    let final_state = graph
        .invoke(TradingState::from_query(query))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(AnalyzeResponse::from(final_state)))
}

/// `GET /health` - liveness probe, reports graph initialization status
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        graph_initialized: state.graph_initialized(),
    })
}

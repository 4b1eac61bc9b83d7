use std::sync::Arc;

use axum::{Json, extract::State, response::Response};
use tracing::debug;

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
    routes::rag::rag_request::{DEFAULT_SEARCH_LIMIT, SearchRequest},
};

/// Handler: POST /rag/search — ranked retrieval without generation.
pub async fn search_route(
    State(state): State<Arc<AppState>>,
    Json(p): Json<SearchRequest>,
) -> AppResult<Response> {
    let limit = p.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let results = state.store.search(&p.query, limit, p.score_threshold).await?;
    debug!(target: "api::rag", hits = results.len(), limit, "search finished");
    Ok(ok(results))
}

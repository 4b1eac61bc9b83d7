use std::sync::Arc;

use axum::{extract::State, response::Response};

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
};

/// Handler: GET /rag/stats
pub async fn stats_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    Ok(ok(state.store.stats().await?))
}

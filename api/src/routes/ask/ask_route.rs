//! POST /ask and GET /ask?query= — answer a migration question.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
    routes::ask::ask_request::{AskParams, AskRequest},
};

/// Handler: POST /ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/ask \
///   -H 'content-type: application/json' \
///   -d '{"query":"How do I emit events in ink!?","limit":3}'
/// ```
pub async fn ask_post(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> AppResult<Response> {
    answer(&state, &body.query, body.limit).await
}

/// Handler: GET /ask?query=...
pub async fn ask_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskParams>,
) -> AppResult<Response> {
    answer(&state, params.query.as_deref().unwrap_or_default(), None).await
}

async fn answer(state: &AppState, query: &str, limit: Option<usize>) -> AppResult<Response> {
    info!(target: "api::ask", chars = query.len(), ?limit, "ask");
    let answer = state.composer.answer_with_limit(query, limit).await?;
    Ok(ok(answer))
}

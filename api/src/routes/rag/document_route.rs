use std::sync::Arc;

use axum::{Json, extract::State, response::Response};
use serde::Serialize;
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
    routes::rag::rag_request::AddDocumentRequest,
};

#[derive(Serialize)]
struct AddDocumentResponse {
    id: String,
}

/// Handler: POST /rag/document — index a free-form knowledge snippet.
pub async fn add_document_route(
    State(state): State<Arc<AppState>>,
    Json(p): Json<AddDocumentRequest>,
) -> AppResult<Response> {
    let id = state
        .store
        .add_document(&p.text, p.category.as_deref(), p.description.as_deref())
        .await?;
    info!(target: "api::rag", %id, "document added");
    Ok(ok(AddDocumentResponse { id }))
}

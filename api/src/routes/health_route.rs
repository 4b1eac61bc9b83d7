use std::sync::Arc;

use ai_llm_service::health_service::HealthStatus;
use axum::{extract::State, response::Response};
use serde::Serialize;

use crate::core::{app_state::AppState, http::response_envelope::ok};

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    index_backend: &'static str,
    collection: String,
    providers: Vec<HealthStatus>,
}

/// Handler: GET /health — liveness plus provider probes.
///
/// Always 200; `status` is `degraded` when any provider probe fails.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let providers = match &state.llm {
        Some(llm) => llm.health_all().await,
        None => Vec::new(),
    };
    let status = if providers.iter().all(|p| p.ok) {
        "ok"
    } else {
        "degraded"
    };
    let index = state.store.config();
    ok(HealthReport {
        status,
        index_backend: match index.backend {
            rag_store::IndexBackend::Qdrant => "qdrant",
            rag_store::IndexBackend::Memory => "memory",
        },
        collection: index.collection.clone(),
        providers,
    })
}

//! POST /training/embed-contracts — pair, synthesize and index both trees.

use std::sync::Arc;

use axum::{extract::State, response::Response};
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
};

pub async fn embed_contracts_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let cfg = &state.config;
    info!(
        target: "api::training",
        solidity = %cfg.solidity_dir.display(),
        ink = %cfg.ink_dir.display(),
        "embedding contract pairs"
    );
    let report = state
        .store
        .embed_contract_sources(&cfg.solidity_dir, &cfg.ink_dir)
        .await?;
    Ok(ok(report))
}

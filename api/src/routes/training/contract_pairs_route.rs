//! GET /training/contract-pairs — preview pairing without indexing.

use std::sync::Arc;

use axum::{extract::State, response::Response};
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
};

pub async fn contract_pairs_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let cfg = &state.config;
    let report = state
        .store
        .contract_pairs(&cfg.solidity_dir, &cfg.ink_dir)
        .await?;
    info!(
        target: "api::training",
        pairs = report.pairs.len(),
        unmatched_a = report.unmatched_a.len(),
        unmatched_b = report.unmatched_b.len(),
        "pairs listed"
    );
    Ok(ok(report))
}

use std::sync::Arc;

pub mod core;
pub mod error_handler;
mod middleware_layer;
pub mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{info, warn};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        ask::ask_route::{ask_get, ask_post},
        health_route::health_route,
        rag::{
            document_route::add_document_route, search_route::search_route,
            stats_route::stats_route,
        },
        training::{
            contract_pairs_route::contract_pairs_route,
            embed_contracts_route::embed_contracts_route,
        },
    },
};

/// Builds the router over an already wired state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_route))
        .route("/ask", post(ask_post).get(ask_get))
        .route("/rag/search", post(search_route))
        .route("/rag/document", post(add_document_route))
        .route("/rag/stats", get(stats_route))
        .route("/training/contract-pairs", get(contract_pairs_route))
        .route("/training/embed-contracts", post(embed_contracts_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Wires state from the environment and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);
    let address = state.config.address.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(AppError::Bind)?;
    info!(target: "api", %address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!(target: "api", "server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(target: "api", error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

use ai_llm_service::AiLlmError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contextor::ContextorError;
use contract_pairs::PairingError;
use rag_store::RagError;
use thiserror::Error;
use tracing::error;

use crate::core::{app_state::ConfigError, http::response_envelope::ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    // --- IO / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("{0}")]
    BadRequest(String),

    // --- Lower layers ---
    #[error(transparent)]
    Rag(#[from] RagError),

    #[error(transparent)]
    Answer(#[from] ContextorError),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            AppError::Llm(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            AppError::Bind(_) => (StatusCode::INTERNAL_SERVER_ERROR, "BIND_ERROR"),
            AppError::Server(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Rag(e) => rag_status(e),
            AppError::Answer(e) => match e {
                ContextorError::Rag(inner) => rag_status(inner),
                ContextorError::Generation(_) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILED"),
                ContextorError::GenerationTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
                ContextorError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            },
        }
    }
}

fn rag_status(e: &RagError) -> (StatusCode, &'static str) {
    match e {
        RagError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        RagError::Embedding(_) | RagError::VectorSizeMismatch { .. } => {
            (StatusCode::BAD_GATEWAY, "EMBEDDING_FAILED")
        }
        RagError::Index(_) => (StatusCode::BAD_GATEWAY, "INDEX_FAILED"),
        RagError::EmbeddingTimeout(_) | RagError::IndexTimeout(_) => {
            (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT")
        }
        RagError::Pairing(PairingError::DuplicateLogicalName { .. }) => {
            (StatusCode::CONFLICT, "DUPLICATE_LOGICAL_NAME")
        }
        RagError::Pairing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        RagError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
        RagError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!(target: "api", code, error = %self, "request failed");
        }
        ApiResponse::<()>::error(code, self.to_string(), Vec::new())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(err: axum::extract::rejection::QueryRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn maps_lower_layer_errors_to_stable_codes() {
        let cases = [
            (
                AppError::from(RagError::InvalidRequest("Query cannot be empty".into())),
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
            ),
            (
                AppError::from(RagError::Embedding("down".into())),
                StatusCode::BAD_GATEWAY,
                "EMBEDDING_FAILED",
            ),
            (
                AppError::from(RagError::Index("down".into())),
                StatusCode::BAD_GATEWAY,
                "INDEX_FAILED",
            ),
            (
                AppError::from(RagError::IndexTimeout(Duration::from_secs(5))),
                StatusCode::GATEWAY_TIMEOUT,
                "TIMEOUT",
            ),
            (
                AppError::from(ContextorError::Generation("503".into())),
                StatusCode::BAD_GATEWAY,
                "GENERATION_FAILED",
            ),
            (
                AppError::from(ContextorError::Rag(RagError::EmbeddingTimeout(
                    Duration::from_secs(5),
                ))),
                StatusCode::GATEWAY_TIMEOUT,
                "TIMEOUT",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "{err}");
        }
    }
}

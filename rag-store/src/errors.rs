//! Unified error types for the crate.

use std::time::Duration;

use contract_pairs::PairingError;
use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Caller supplied an out-of-range argument.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Embedding service failed.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Embedding service did not answer in time.
    #[error("embedding timed out after {0:?}")]
    EmbeddingTimeout(Duration),

    /// Similarity index failed.
    #[error("index error: {0}")]
    Index(String),

    /// Similarity index did not answer in time.
    #[error("index timed out after {0:?}")]
    IndexTimeout(Duration),

    /// Vector length differs from the collection dimension.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Discovering or reading example sources failed.
    #[error(transparent)]
    Pairing(#[from] PairingError),

    /// Background task failed to complete.
    #[error("internal: {0}")]
    Internal(String),
}

impl RagError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::EmbeddingTimeout(_) | Self::IndexTimeout(_))
    }
}

/// Runs `fut` under `limit`; elapsed time maps through `on_timeout`.
pub(crate) async fn within<T, F>(
    limit: Duration,
    on_timeout: fn(Duration) -> RagError,
    fut: F,
) -> Result<T, RagError>
where
    F: std::future::Future<Output = Result<T, RagError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res,
        Err(_) => Err(on_timeout(limit)),
    }
}

//! Typed error for the contextor crate.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// Retrieval failed (embedding, index, or invalid arguments).
    #[error(transparent)]
    Rag(#[from] rag_store::RagError),

    /// The generation service answered with an error.
    #[error("generation error: {0}")]
    Generation(String),

    /// The generation service did not answer in time.
    #[error("generation timed out after {0:?}")]
    GenerationTimeout(Duration),

    /// Invalid environment configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl ContextorError {
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::GenerationTimeout(_) => true,
            Self::Rag(e) => e.is_timeout(),
            _ => false,
        }
    }
}

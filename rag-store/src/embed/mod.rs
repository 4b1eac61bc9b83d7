use crate::errors::RagError;
use std::{future::Future, pin::Pin};

/// Boxed future returned by the async seams of this crate.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Provider interface for embedding generation.
///
/// Async because real providers (Ollama, OpenAI) perform HTTP requests.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds `text` into a fixed-length vector.
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>>;
}

pub mod llm;

pub use llm::LlmEmbedder;

use std::sync::Arc;
use std::time::Duration;

use ai_llm_service::{AiLlmError, LlmServiceProfiles};
use tracing::debug;

use super::{BoxFuture, EmbeddingsProvider};
use crate::errors::RagError;

/// Embeddings through the shared LLM service, with a dimension check.
pub struct LlmEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: usize,
}

impl LlmEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: usize) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async move {
            let limit = self.svc.profiles().1.timeout();
            let v = self
                .svc
                .embed(text)
                .await
                .map_err(|e| map_llm_error(e, limit))?;
            if v.len() != self.dim {
                return Err(RagError::VectorSizeMismatch {
                    got: v.len(),
                    want: self.dim,
                });
            }
            debug!(target: "rag_store::embed", dim = v.len(), chars = text.len(), "embedded");
            Ok(v)
        })
    }
}

fn map_llm_error(e: AiLlmError, limit: Duration) -> RagError {
    match e {
        AiLlmError::Timeout(d) => RagError::EmbeddingTimeout(d),
        e if e.is_timeout() => RagError::EmbeddingTimeout(limit),
        other => RagError::Embedding(other.to_string()),
    }
}

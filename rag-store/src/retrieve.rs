//! Query-time retrieval: embed the query, k-NN search, threshold, rank.

use serde::Serialize;
use tracing::{debug, trace};

use contract_pairs::synthesize::keys;

use crate::config::RagConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::{RagError, within};
use crate::index::{Payload, VectorIndex};

/// One ranked hit handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalResult {
    /// Point id in the index.
    pub id: String,
    /// Indexed document text.
    pub content: String,
    pub score: f32,
    /// Payload without the `text` key.
    pub metadata: Payload,
}

/// Retrieves up to `limit` documents scoring at least `threshold`.
///
/// Results are ordered by descending score; equal scores by ascending id.
/// An empty vector is a valid outcome.
///
/// # Errors
/// - `InvalidRequest` for an empty query, `limit == 0`, or a threshold
///   outside `[-1, 1]`.
/// - Embedding and index failures propagate unchanged (no retry).
pub async fn search(
    index: &dyn VectorIndex,
    embedder: &dyn EmbeddingsProvider,
    cfg: &RagConfig,
    query: &str,
    limit: usize,
    threshold: Option<f32>,
) -> Result<Vec<RetrievalResult>, RagError> {
    validate(query, limit, threshold)?;
    trace!(target: "rag_store::search", limit, ?threshold, chars = query.len(), "search");
    let vector = embed_query(embedder, cfg, query).await?;
    search_by_vector(index, cfg, vector, limit, threshold).await
}

/// Embeds a non-empty query under the embedding timeout.
pub async fn embed_query(
    embedder: &dyn EmbeddingsProvider,
    cfg: &RagConfig,
    query: &str,
) -> Result<Vec<f32>, RagError> {
    if query.trim().is_empty() {
        return Err(RagError::InvalidRequest("Query cannot be empty".into()));
    }
    within(
        cfg.embed_timeout,
        RagError::EmbeddingTimeout,
        embedder.embed(query),
    )
    .await
}

/// k-NN search with a ready query vector, then threshold, ranking and
/// truncation.
pub async fn search_by_vector(
    index: &dyn VectorIndex,
    cfg: &RagConfig,
    vector: Vec<f32>,
    limit: usize,
    threshold: Option<f32>,
) -> Result<Vec<RetrievalResult>, RagError> {
    validate_bounds(limit, threshold)?;
    let hits = within(
        cfg.index_timeout,
        RagError::IndexTimeout,
        index.search(vector, limit, threshold),
    )
    .await?;

    let mut results: Vec<RetrievalResult> = hits
        .into_iter()
        .filter(|h| threshold.is_none_or(|t| h.score >= t))
        .map(|h| {
            let mut metadata = h.payload;
            let content = metadata.remove(keys::TEXT).unwrap_or_default();
            RetrievalResult {
                id: h.id,
                content,
                score: h.score,
                metadata,
            }
        })
        .collect();
    results.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    results.truncate(limit);

    debug!(target: "rag_store::search", hits = results.len(), "search finished");
    Ok(results)
}

fn validate(query: &str, limit: usize, threshold: Option<f32>) -> Result<(), RagError> {
    if query.trim().is_empty() {
        return Err(RagError::InvalidRequest("Query cannot be empty".into()));
    }
    validate_bounds(limit, threshold)
}

fn validate_bounds(limit: usize, threshold: Option<f32>) -> Result<(), RagError> {
    if limit == 0 {
        return Err(RagError::InvalidRequest("limit must be >= 1".into()));
    }
    if let Some(t) = threshold {
        if !(-1.0..=1.0).contains(&t) {
            return Err(RagError::InvalidRequest(format!(
                "score_threshold must be within [-1, 1], got {t}"
            )));
        }
    }
    Ok(())
}

//! Indexing pipeline: training documents → embeddings → vector index.
//!
//! Documents are processed with bounded parallelism. A failure on one
//! document is recorded in the report and never aborts the batch; only a
//! failure to prepare the collection is fatal.

use contract_pairs::TrainingDocument;
use contract_pairs::synthesize::keys;
use futures::{StreamExt, stream};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::RagConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::{RagError, within};
use crate::ids::pair_point_id;
use crate::index::{IndexedDocument, VectorIndex};

/// Per-document failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub pair_id: String,
    pub reason: String,
}

/// Outcome of [`index_all`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexReport {
    /// Documents that reached the index.
    pub processed: usize,
    /// Point ids of indexed documents, in input order.
    pub ids: Vec<String>,
    pub errors: Vec<ErrorDetail>,
}

/// Embeds and upserts every document.
///
/// # Errors
/// Only when the collection cannot be created or checked.
pub async fn index_all(
    index: &dyn VectorIndex,
    embedder: &dyn EmbeddingsProvider,
    cfg: &RagConfig,
    docs: &[TrainingDocument],
) -> Result<IndexReport, RagError> {
    within(
        cfg.index_timeout,
        RagError::IndexTimeout,
        index.ensure_collection(cfg.embedding_dim),
    )
    .await?;

    info!(
        target: "rag_store::index",
        backend = index.backend(),
        collection = index.collection(),
        documents = docs.len(),
        concurrency = cfg.index_concurrency,
        "indexing started"
    );

    let pending: Vec<_> = docs
        .iter()
        .enumerate()
        .map(|(pos, doc)| index_at(index, embedder, cfg, pos, doc))
        .collect();
    let mut outcomes: Vec<(usize, &str, Result<String, RagError>)> = stream::iter(pending)
        .buffer_unordered(cfg.index_concurrency.max(1))
        .collect()
        .await;
    outcomes.sort_by_key(|(pos, _, _)| *pos);

    let mut report = IndexReport::default();
    for (_, pair_id, res) in outcomes {
        match res {
            Ok(id) => {
                report.processed += 1;
                report.ids.push(id);
            }
            Err(e) => {
                warn!(target: "rag_store::index", pair_id, error = %e, "document skipped");
                report.errors.push(ErrorDetail {
                    pair_id: pair_id.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        target: "rag_store::index",
        processed = report.processed,
        failed = report.errors.len(),
        "indexing finished"
    );
    Ok(report)
}

async fn index_at<'a>(
    index: &dyn VectorIndex,
    embedder: &dyn EmbeddingsProvider,
    cfg: &RagConfig,
    pos: usize,
    doc: &'a TrainingDocument,
) -> (usize, &'a str, Result<String, RagError>) {
    let res = index_one(index, embedder, cfg, doc).await;
    (pos, doc.metadata.pair_id.as_str(), res)
}

/// Indexes a single document and returns its point id.
pub async fn index_one(
    index: &dyn VectorIndex,
    embedder: &dyn EmbeddingsProvider,
    cfg: &RagConfig,
    doc: &TrainingDocument,
) -> Result<String, RagError> {
    let vector = within(
        cfg.embed_timeout,
        RagError::EmbeddingTimeout,
        embedder.embed(&doc.source_text),
    )
    .await?;

    let id = pair_point_id(&doc.metadata.pair_id);
    let mut payload = doc.metadata.to_payload();
    payload.insert(keys::TEXT.to_string(), doc.source_text.clone());

    within(
        cfg.index_timeout,
        RagError::IndexTimeout,
        index.upsert(vec![IndexedDocument {
            id: id.clone(),
            vector,
            payload,
        }]),
    )
    .await?;

    debug!(target: "rag_store::index", pair_id = %doc.metadata.pair_id, %id, "document indexed");
    Ok(id)
}

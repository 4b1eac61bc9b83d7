use std::path::PathBuf;
use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use contract_pairs::synthesize::keys;
use contract_pairs::{MatchReport, SkippedFile, TrainingDocument, find_pairs, synthesize};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{IndexBackend, RagConfig};
use crate::embed::{EmbeddingsProvider, LlmEmbedder};
use crate::errors::{RagError, within};
use crate::ids::text_point_id;
use crate::index::{IndexedDocument, MemoryIndex, Payload, QdrantIndex, VectorIndex};
use crate::ingest::{ErrorDetail, IndexReport, index_all};
use crate::retrieve::{RetrievalResult, embed_query, search, search_by_vector};

/// Source tag of documents added through [`RagStore::add_document`].
pub const AD_HOC_SOURCE: &str = "api";

/// Collection summary.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub collection: String,
    pub backend: &'static str,
    pub documents: u64,
}

/// Result of the full pairing → synthesis → indexing pipeline.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainingReport {
    pub pairs_found: usize,
    pub processed: usize,
    pub ids: Vec<String>,
    pub errors: Vec<ErrorDetail>,
    pub unmatched_a: Vec<String>,
    pub unmatched_b: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

/// Shared handle over one index and one embedder.
///
/// Cheap to clone; all state lives behind `Arc`.
#[derive(Clone)]
pub struct RagStore {
    cfg: RagConfig,
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn EmbeddingsProvider>,
}

impl RagStore {
    pub fn new(
        cfg: RagConfig,
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Self {
        Self {
            cfg,
            index,
            embedder,
        }
    }

    /// Builds the configured backend and an embedder over `llm`.
    ///
    /// # Errors
    /// `Config` when the config is invalid or the Qdrant client cannot be built.
    pub fn from_config(cfg: RagConfig, llm: Arc<LlmServiceProfiles>) -> Result<Self, RagError> {
        cfg.validate()?;
        let index: Arc<dyn VectorIndex> = match cfg.backend {
            IndexBackend::Qdrant => Arc::new(QdrantIndex::new(&cfg)?),
            IndexBackend::Memory => Arc::new(MemoryIndex::new(cfg.collection.clone())),
        };
        let embedder = Arc::new(LlmEmbedder::new(llm, cfg.embedding_dim));
        info!(
            target: "rag_store",
            backend = index.backend(),
            collection = %cfg.collection,
            dim = cfg.embedding_dim,
            "store ready"
        );
        Ok(Self::new(cfg, index, embedder))
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    /// Embeds and upserts `docs`; see [`index_all`].
    pub async fn index_documents(&self, docs: &[TrainingDocument]) -> Result<IndexReport, RagError> {
        index_all(self.index.as_ref(), self.embedder.as_ref(), &self.cfg, docs).await
    }

    /// Ranked retrieval; see [`search`].
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        threshold: Option<f32>,
    ) -> Result<Vec<RetrievalResult>, RagError> {
        search(
            self.index.as_ref(),
            self.embedder.as_ref(),
            &self.cfg,
            query,
            limit,
            threshold,
        )
        .await
    }

    /// Embeds a query; first half of [`RagStore::search`].
    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>, RagError> {
        embed_query(self.embedder.as_ref(), &self.cfg, query).await
    }

    /// Ranked retrieval with a ready query vector.
    pub async fn search_by_vector(
        &self,
        vector: Vec<f32>,
        limit: usize,
        threshold: Option<f32>,
    ) -> Result<Vec<RetrievalResult>, RagError> {
        search_by_vector(self.index.as_ref(), &self.cfg, vector, limit, threshold).await
    }

    /// Indexes a free-form document and returns its point id.
    ///
    /// The id derives from the text, so resubmitting the same text replaces
    /// the earlier point.
    pub async fn add_document(
        &self,
        text: &str,
        category: Option<&str>,
        description: Option<&str>,
    ) -> Result<String, RagError> {
        if text.trim().is_empty() {
            return Err(RagError::InvalidRequest(
                "Document text cannot be empty".into(),
            ));
        }

        within(
            self.cfg.index_timeout,
            RagError::IndexTimeout,
            self.index.ensure_collection(self.cfg.embedding_dim),
        )
        .await?;
        let vector = within(
            self.cfg.embed_timeout,
            RagError::EmbeddingTimeout,
            self.embedder.embed(text),
        )
        .await?;

        let id = text_point_id(text);
        let mut payload = Payload::new();
        payload.insert(keys::TEXT.into(), text.to_string());
        payload.insert(keys::SOURCE.into(), AD_HOC_SOURCE.into());
        payload.insert("type".into(), "user_document".into());
        payload.insert(
            keys::CATEGORY.into(),
            category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or("other")
                .to_string(),
        );
        if let Some(d) = description.map(str::trim).filter(|d| !d.is_empty()) {
            payload.insert(keys::DESCRIPTION.into(), d.to_string());
        }

        within(
            self.cfg.index_timeout,
            RagError::IndexTimeout,
            self.index.upsert(vec![IndexedDocument {
                id: id.clone(),
                vector,
                payload,
            }]),
        )
        .await?;

        debug!(target: "rag_store", %id, chars = text.len(), "ad-hoc document indexed");
        Ok(id)
    }

    /// Number of points in the collection.
    ///
    /// A missing collection counts as empty for the in-memory backend only;
    /// Qdrant reports it as an index error.
    pub async fn stats(&self) -> Result<StoreStats, RagError> {
        let documents = within(self.cfg.index_timeout, RagError::IndexTimeout, self.index.count())
            .await?;
        Ok(StoreStats {
            collection: self.index.collection().to_string(),
            backend: self.index.backend(),
            documents,
        })
    }

    /// Runs the matcher over two example trees on the blocking pool.
    pub async fn contract_pairs(
        &self,
        dir_a: impl Into<PathBuf>,
        dir_b: impl Into<PathBuf>,
    ) -> Result<MatchReport, RagError> {
        let (dir_a, dir_b) = (dir_a.into(), dir_b.into());
        let report = tokio::task::spawn_blocking(move || find_pairs(&dir_a, &dir_b))
            .await
            .map_err(|e| RagError::Internal(format!("matcher task: {e}")))??;
        Ok(report)
    }

    /// Pairs, synthesizes and indexes both example trees.
    pub async fn embed_contract_sources(
        &self,
        dir_a: impl Into<PathBuf>,
        dir_b: impl Into<PathBuf>,
    ) -> Result<TrainingReport, RagError> {
        let matched = self.contract_pairs(dir_a, dir_b).await?;
        let docs: Vec<TrainingDocument> = matched.pairs.iter().map(synthesize).collect();
        info!(
            target: "rag_store::index",
            pairs = docs.len(),
            unmatched_a = matched.unmatched_a.len(),
            unmatched_b = matched.unmatched_b.len(),
            skipped = matched.skipped.len(),
            "training documents synthesized"
        );

        let indexed = self.index_documents(&docs).await?;
        Ok(TrainingReport {
            pairs_found: docs.len(),
            processed: indexed.processed,
            ids: indexed.ids,
            errors: indexed.errors,
            unmatched_a: matched.unmatched_a,
            unmatched_b: matched.unmatched_b,
            skipped: matched.skipped,
        })
    }
}

//! Similarity index seam.
//!
//! [`qdrant::QdrantIndex`] is the production backend; [`memory::MemoryIndex`]
//! is a brute-force cosine store for tests and local runs.

use std::collections::BTreeMap;

use crate::embed::BoxFuture;
use crate::errors::RagError;

pub mod memory;
pub mod qdrant;

pub use memory::MemoryIndex;
pub use qdrant::QdrantIndex;

/// Flat string payload stored next to each vector.
pub type Payload = BTreeMap<String, String>;

/// A point ready for upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedDocument {
    /// UUID string (see [`crate::ids`]).
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: Payload,
}

/// One k-NN hit as returned by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPoint {
    pub id: String,
    pub score: f32,
    pub payload: Payload,
}

/// Minimal vector store contract used by the indexer and the retriever.
pub trait VectorIndex: Send + Sync {
    /// Backend label for logs and stats.
    fn backend(&self) -> &'static str;

    /// Collection name.
    fn collection(&self) -> &str;

    /// Creates the collection if missing. No-op when it exists.
    fn ensure_collection(&self, dim: usize) -> BoxFuture<'_, Result<(), RagError>>;

    /// Inserts or replaces points by id.
    fn upsert(&self, points: Vec<IndexedDocument>) -> BoxFuture<'_, Result<(), RagError>>;

    /// Top-`limit` points by similarity; `threshold` drops lower scores when set.
    fn search(
        &self,
        vector: Vec<f32>,
        limit: usize,
        threshold: Option<f32>,
    ) -> BoxFuture<'_, Result<Vec<ScoredPoint>, RagError>>;

    /// Number of stored points.
    fn count(&self) -> BoxFuture<'_, Result<u64, RagError>>;
}

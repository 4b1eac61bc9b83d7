//! Indexing and retrieval of Solidity/ink! training documents.
//!
//! - [`ingest::index_all`] embeds documents and upserts them with bounded
//!   parallelism, isolating per-document failures.
//! - [`retrieve::search`] embeds a query and returns threshold-filtered,
//!   ranked hits.
//! - [`RagStore`] wires one [`index::VectorIndex`] and one
//!   [`embed::EmbeddingsProvider`] behind a cloneable handle.

pub mod config;
pub mod embed;
pub mod errors;
pub mod ids;
pub mod index;
pub mod ingest;
pub mod retrieve;
mod store;

pub use config::{DistanceKind, IndexBackend, RagConfig};
pub use embed::{BoxFuture, EmbeddingsProvider, LlmEmbedder};
pub use errors::RagError;
pub use index::{IndexedDocument, MemoryIndex, Payload, QdrantIndex, ScoredPoint, VectorIndex};
pub use ingest::{ErrorDetail, IndexReport};
pub use retrieve::RetrievalResult;
pub use store::{AD_HOC_SOURCE, RagStore, StoreStats, TrainingReport};

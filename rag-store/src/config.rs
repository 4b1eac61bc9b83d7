//! Runtime and collection configuration.
//!
//! # Environment variables
//! - `INDEX_BACKEND`        = `qdrant` (default) | `memory`
//! - `QDRANT_URL`           = gRPC endpoint (default `http://localhost:6334`)
//! - `QDRANT_API_KEY`       = optional
//! - `QDRANT_COLLECTION`    = default `contract_pairs`
//! - `QDRANT_DISTANCE`      = `cosine` (default) | `dot` | `euclid`
//! - `QDRANT_EXACT_SEARCH`  = `true` to bypass HNSW (default false)
//! - `EMBEDDING_DIM`        = vector size (default 1024)
//! - `INDEX_CONCURRENCY`    = parallel documents while indexing (default 4)
//! - `EMBEDDING_TIMEOUT_SECS` = default 5
//! - `INDEX_TIMEOUT_SECS`   = default 5

use std::str::FromStr;
use std::time::Duration;

use crate::errors::RagError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    Cosine,
    Dot,
    Euclid,
}

impl FromStr for DistanceKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "dot" | "dotproduct" => Ok(Self::Dot),
            "euclid" | "euclidean" | "l2" => Ok(Self::Euclid),
            other => Err(RagError::Config(format!("unknown distance: {other}"))),
        }
    }
}

/// Which [`crate::index::VectorIndex`] implementation to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexBackend {
    Qdrant,
    Memory,
}

impl FromStr for IndexBackend {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qdrant" => Ok(Self::Qdrant),
            "memory" | "in-memory" | "inmemory" => Ok(Self::Memory),
            other => Err(RagError::Config(format!("unknown INDEX_BACKEND: {other}"))),
        }
    }
}

/// Configuration for indexing and retrieval.
#[derive(Clone, Debug)]
pub struct RagConfig {
    pub backend: IndexBackend,
    /// Qdrant endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub collection: String,
    pub distance: DistanceKind,
    pub embedding_dim: usize,
    /// Max documents embedded/upserted at once.
    pub index_concurrency: usize,
    pub embed_timeout: Duration,
    pub index_timeout: Duration,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
}

impl RagConfig {
    /// Defaults for a collection on a local Qdrant.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            backend: IndexBackend::Qdrant,
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            embedding_dim: 1024,
            index_concurrency: 4,
            embed_timeout: Duration::from_secs(5),
            index_timeout: Duration::from_secs(5),
            exact_search: false,
        }
    }

    /// In-memory index with the given vector size; used by tests and local runs.
    pub fn in_memory(embedding_dim: usize) -> Self {
        Self {
            backend: IndexBackend::Memory,
            embedding_dim,
            ..Self::new_default("memory://", "contract_pairs")
        }
    }

    /// Reads configuration from the environment.
    pub fn from_env() -> Result<Self, RagError> {
        let mut cfg = Self::new_default(
            env_or("QDRANT_URL", "http://localhost:6334"),
            env_or("QDRANT_COLLECTION", "contract_pairs"),
        );
        if let Some(v) = env_opt("INDEX_BACKEND") {
            cfg.backend = v.parse()?;
        }
        cfg.qdrant_api_key = env_opt("QDRANT_API_KEY");
        if let Some(v) = env_opt("QDRANT_DISTANCE") {
            cfg.distance = v.parse()?;
        }
        cfg.exact_search = env_opt("QDRANT_EXACT_SEARCH")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        cfg.embedding_dim = read_usize("EMBEDDING_DIM", cfg.embedding_dim)?;
        cfg.index_concurrency = read_usize("INDEX_CONCURRENCY", cfg.index_concurrency)?;
        cfg.embed_timeout =
            Duration::from_secs(read_usize("EMBEDDING_TIMEOUT_SECS", 5)? as u64);
        cfg.index_timeout = Duration::from_secs(read_usize("INDEX_TIMEOUT_SECS", 5)? as u64);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.backend == IndexBackend::Qdrant && self.qdrant_url.trim().is_empty() {
            return Err(RagError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(RagError::Config("collection is empty".into()));
        }
        if self.embedding_dim == 0 {
            return Err(RagError::Config("EMBEDDING_DIM must be > 0".into()));
        }
        if self.index_concurrency == 0 {
            return Err(RagError::Config("INDEX_CONCURRENCY must be > 0".into()));
        }
        if self.embed_timeout.is_zero() || self.index_timeout.is_zero() {
            return Err(RagError::Config("timeouts must be > 0".into()));
        }
        Ok(())
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

fn read_usize(name: &str, default: usize) -> Result<usize, RagError> {
    match env_opt(name) {
        Some(v) => v
            .trim()
            .parse::<usize>()
            .map_err(|_| RagError::Config(format!("{name} must be a non-negative integer"))),
        None => Ok(default),
    }
}

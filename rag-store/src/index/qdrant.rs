//! Thin adapter around `qdrant-client`.
//!
//! Keeps the builder API in one place so the rest of the crate only sees
//! [`VectorIndex`].

use std::collections::HashMap;

use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, Distance, PointStruct, SearchParamsBuilder,
    SearchPointsBuilder, UpsertPointsBuilder, Value as QValue, VectorParamsBuilder,
    point_id::PointIdOptions, value::Kind,
};
use qdrant_client::{Payload as QPayload, Qdrant};
use tracing::{debug, info};

use super::{IndexedDocument, Payload, ScoredPoint, VectorIndex};
use crate::config::{DistanceKind, RagConfig};
use crate::embed::BoxFuture;
use crate::errors::RagError;

fn qdrant_err(op: &str, e: impl std::fmt::Display) -> RagError {
    RagError::Index(format!("{op}: {e}"))
}

pub struct QdrantIndex {
    client: Qdrant,
    collection: String,
    distance: DistanceKind,
    exact: bool,
}

impl QdrantIndex {
    /// Builds the client; no network call happens here.
    pub fn new(cfg: &RagConfig) -> Result<Self, RagError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .timeout(cfg.index_timeout)
            .build()
            .map_err(|e| RagError::Config(format!("qdrant client: {e}")))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
            exact: cfg.exact_search,
        })
    }
}

impl VectorIndex for QdrantIndex {
    fn backend(&self) -> &'static str {
        "qdrant"
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn ensure_collection(&self, dim: usize) -> BoxFuture<'_, Result<(), RagError>> {
        Box::pin(async move {
            let exists = self
                .client
                .collection_exists(self.collection.clone())
                .await
                .map_err(|e| qdrant_err("collection_exists", e))?;
            if exists {
                debug!(target: "rag_store::qdrant", collection = %self.collection, "collection exists");
                return Ok(());
            }

            let distance = match self.distance {
                DistanceKind::Cosine => Distance::Cosine,
                DistanceKind::Dot => Distance::Dot,
                DistanceKind::Euclid => Distance::Euclid,
            };
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(VectorParamsBuilder::new(dim as u64, distance)),
                )
                .await
                .map_err(|e| qdrant_err("create_collection", e))?;

            info!(
                target: "rag_store::qdrant",
                collection = %self.collection,
                dim,
                distance = ?self.distance,
                "collection created"
            );
            Ok(())
        })
    }

    fn upsert(&self, points: Vec<IndexedDocument>) -> BoxFuture<'_, Result<(), RagError>> {
        Box::pin(async move {
            if points.is_empty() {
                return Ok(());
            }
            let n = points.len();
            let points: Vec<PointStruct> = points
                .into_iter()
                .map(|p| PointStruct::new(p.id, p.vector, to_qdrant_payload(p.payload)))
                .collect();

            self.client
                .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
                .await
                .map_err(|e| qdrant_err("upsert_points", e))?;

            debug!(target: "rag_store::qdrant", collection = %self.collection, points = n, "upserted");
            Ok(())
        })
    }

    fn search(
        &self,
        vector: Vec<f32>,
        limit: usize,
        threshold: Option<f32>,
    ) -> BoxFuture<'_, Result<Vec<ScoredPoint>, RagError>> {
        Box::pin(async move {
            let mut builder = SearchPointsBuilder::new(&self.collection, vector, limit as u64)
                .with_payload(true)
                .with_vectors(false);
            if let Some(t) = threshold {
                builder = builder.score_threshold(t);
            }
            if self.exact {
                builder = builder.params(SearchParamsBuilder::default().exact(true));
            }

            let resp = self
                .client
                .search_points(builder)
                .await
                .map_err(|e| qdrant_err("search_points", e))?;

            Ok(resp.result.into_iter().map(map_scored_point).collect())
        })
    }

    fn count(&self) -> BoxFuture<'_, Result<u64, RagError>> {
        Box::pin(async move {
            let resp = self
                .client
                .count(CountPointsBuilder::new(&self.collection).exact(true))
                .await
                .map_err(|e| qdrant_err("count", e))?;
            Ok(resp.result.map(|r| r.count).unwrap_or(0))
        })
    }
}

fn to_qdrant_payload(payload: Payload) -> QPayload {
    let map: HashMap<String, QValue> = payload
        .into_iter()
        .map(|(k, v)| (k, QValue::from(v)))
        .collect();
    QPayload::from(map)
}

fn map_scored_point(sp: qdrant_client::qdrant::ScoredPoint) -> ScoredPoint {
    let id = match sp.id.and_then(|pid| pid.point_id_options) {
        Some(PointIdOptions::Uuid(s)) => s,
        Some(PointIdOptions::Num(n)) => n.to_string(),
        None => String::new(),
    };
    ScoredPoint {
        id,
        score: sp.score,
        payload: from_qdrant_payload(sp.payload),
    }
}

/// Scalar values become strings; nested values are dropped.
fn from_qdrant_payload(p: HashMap<String, QValue>) -> Payload {
    p.into_iter()
        .filter_map(|(k, v)| {
            let s = match v.kind? {
                Kind::StringValue(s) => s,
                Kind::IntegerValue(i) => i.to_string(),
                Kind::DoubleValue(f) => f.to_string(),
                Kind::BoolValue(b) => b.to_string(),
                _ => return None,
            };
            Some((k, s))
        })
        .collect()
}

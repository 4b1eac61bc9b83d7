//! In-memory [`VectorIndex`] for tests and local runs.
//!
//! Points live in a `BTreeMap` behind `std::sync::RwLock`; search is
//! brute-force cosine similarity.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{IndexedDocument, Payload, ScoredPoint, VectorIndex};
use crate::embed::BoxFuture;
use crate::errors::RagError;

struct StoredPoint {
    vector: Vec<f32>,
    payload: Payload,
}

#[derive(Default)]
struct Inner {
    dim: Option<usize>,
    points: BTreeMap<String, StoredPoint>,
}

pub struct MemoryIndex {
    collection: String,
    inner: RwLock<Inner>,
}

impl MemoryIndex {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            inner: RwLock::new(Inner::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, RagError> {
        self.inner
            .read()
            .map_err(|_| RagError::Index("memory index lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, RagError> {
        self.inner
            .write()
            .map_err(|_| RagError::Index("memory index lock poisoned".into()))
    }

    fn upsert_sync(&self, points: Vec<IndexedDocument>) -> Result<(), RagError> {
        let mut inner = self.write()?;
        let Some(dim) = inner.dim else {
            return Err(RagError::Index(format!(
                "collection '{}' does not exist",
                self.collection
            )));
        };
        if let Some(bad) = points.iter().find(|p| p.vector.len() != dim) {
            return Err(RagError::VectorSizeMismatch {
                got: bad.vector.len(),
                want: dim,
            });
        }
        for p in points {
            inner.points.insert(
                p.id,
                StoredPoint {
                    vector: p.vector,
                    payload: p.payload,
                },
            );
        }
        Ok(())
    }

    fn search_sync(
        &self,
        vector: &[f32],
        limit: usize,
        threshold: Option<f32>,
    ) -> Result<Vec<ScoredPoint>, RagError> {
        let inner = self.read()?;
        if let Some(dim) = inner.dim {
            if vector.len() != dim {
                return Err(RagError::VectorSizeMismatch {
                    got: vector.len(),
                    want: dim,
                });
            }
        }
        let mut hits: Vec<ScoredPoint> = inner
            .points
            .iter()
            .map(|(id, p)| ScoredPoint {
                id: id.clone(),
                score: cosine_sim(vector, &p.vector),
                payload: p.payload.clone(),
            })
            .filter(|h| threshold.is_none_or(|t| h.score >= t))
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(limit);
        Ok(hits)
    }
}

impl VectorIndex for MemoryIndex {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn ensure_collection(&self, dim: usize) -> BoxFuture<'_, Result<(), RagError>> {
        Box::pin(async move {
            let mut inner = self.write()?;
            match inner.dim {
                Some(existing) if existing != dim => Err(RagError::VectorSizeMismatch {
                    got: dim,
                    want: existing,
                }),
                Some(_) => Ok(()),
                None => {
                    inner.dim = Some(dim);
                    Ok(())
                }
            }
        })
    }

    fn upsert(&self, points: Vec<IndexedDocument>) -> BoxFuture<'_, Result<(), RagError>> {
        Box::pin(async move { self.upsert_sync(points) })
    }

    fn search(
        &self,
        vector: Vec<f32>,
        limit: usize,
        threshold: Option<f32>,
    ) -> BoxFuture<'_, Result<Vec<ScoredPoint>, RagError>> {
        Box::pin(async move { self.search_sync(&vector, limit, threshold) })
    }

    fn count(&self) -> BoxFuture<'_, Result<u64, RagError>> {
        Box::pin(async move { Ok(self.read()?.points.len() as u64) })
    }
}

pub(crate) fn cosine_sim(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a < f32::EPSILON || mag_b < f32::EPSILON {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

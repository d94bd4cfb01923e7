use crate::database::{AddBatch, CollectionHandle, QueryResponse, VectorDatabase};
use crate::error::{Result, StoreError};
use crate::types::Metadata;
use semdex_embedder::cosine_similarity;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process vector database
///
/// Keeps collections in a map and scans them linearly on query, which is
/// plenty for tests and small offline corpora. Distances are cosine
/// distances (`1 - cosine similarity`), matching the HTTP backend.
#[derive(Default)]
pub struct MemoryVectorDatabase {
    collections: Mutex<HashMap<String, MemoryCollection>>,
}

#[derive(Default)]
struct MemoryCollection {
    dimension: Option<usize>,
    entries: Vec<MemoryEntry>,
}

struct MemoryEntry {
    id: String,
    document: String,
    embedding: Vec<f32>,
    metadata: Option<Metadata>,
}

impl MemoryVectorDatabase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collections created so far
    #[must_use]
    pub fn collection_count(&self) -> usize {
        self.lock().len()
    }

    /// Number of records in a collection, if it exists
    #[must_use]
    pub fn collection_len(&self, name: &str) -> Option<usize> {
        self.lock().get(name).map(|c| c.entries.len())
    }

    /// Record ids of a collection, in insertion order
    #[must_use]
    pub fn ids(&self, name: &str) -> Vec<String> {
        self.lock()
            .get(name)
            .map(|c| c.entries.iter().map(|e| e.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Metadata stored for a record, if any
    #[must_use]
    pub fn metadata(&self, name: &str, id: &str) -> Option<Metadata> {
        self.lock()
            .get(name)
            .and_then(|c| c.entries.iter().find(|e| e.id == id))
            .and_then(|e| e.metadata.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, MemoryCollection>> {
        self.collections
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl VectorDatabase for MemoryVectorDatabase {
    async fn get_or_create_collection(&self, name: &str) -> Result<CollectionHandle> {
        let mut collections = self.lock();
        collections.entry(name.to_string()).or_default();
        Ok(CollectionHandle {
            id: format!("mem-{name}"),
            name: name.to_string(),
        })
    }

    async fn add(&self, collection: &CollectionHandle, batch: AddBatch) -> Result<()> {
        let mut collections = self.lock();
        let stored = collections
            .get_mut(&collection.name)
            .ok_or_else(|| StoreError::transport(format!("Unknown collection: {}", collection.name)))?;

        // All embeddings must share one dimension per collection
        let expected = stored
            .dimension
            .or_else(|| batch.embeddings.first().map(Vec::len));
        if let Some(expected) = expected {
            for embedding in &batch.embeddings {
                if embedding.len() != expected {
                    return Err(StoreError::InvalidDimension {
                        expected,
                        actual: embedding.len(),
                    });
                }
            }
            stored.dimension = Some(expected);
        }

        let metadatas = match batch.metadatas {
            Some(metadatas) => metadatas.into_iter().map(Some).collect::<Vec<_>>(),
            None => vec![None; batch.ids.len()],
        };

        for ((id, document), (embedding, metadata)) in batch
            .ids
            .into_iter()
            .zip(batch.documents)
            .zip(batch.embeddings.into_iter().zip(metadatas))
        {
            stored.entries.push(MemoryEntry {
                id,
                document,
                embedding,
                metadata,
            });
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &CollectionHandle,
        embedding: &[f32],
        n_results: usize,
    ) -> Result<QueryResponse> {
        let collections = self.lock();
        let stored = collections
            .get(&collection.name)
            .ok_or_else(|| StoreError::transport(format!("Unknown collection: {}", collection.name)))?;

        if stored.entries.is_empty() {
            return Ok(QueryResponse::default());
        }
        if let Some(expected) = stored.dimension {
            if embedding.len() != expected {
                return Err(StoreError::InvalidDimension {
                    expected,
                    actual: embedding.len(),
                });
            }
        }

        let mut scored: Vec<(f32, &MemoryEntry)> = stored
            .entries
            .iter()
            .map(|entry| (1.0 - cosine_similarity(embedding, &entry.embedding), entry))
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(n_results);

        Ok(QueryResponse {
            ids: scored.iter().map(|(_, e)| e.id.clone()).collect(),
            documents: scored.iter().map(|(_, e)| e.document.clone()).collect(),
            distances: scored.iter().map(|(d, _)| *d).collect(),
        })
    }
}

use crate::error::Result;
use crate::types::Metadata;

/// Handle to a named collection inside a vector database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    pub id: String,
    pub name: String,
}

/// One batch of records to insert into a collection
///
/// `ids`, `documents` and `embeddings` are parallel vectors;
/// `metadatas`, when present, parallels them too.
#[derive(Debug, Clone)]
pub struct AddBatch {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
    pub metadatas: Option<Vec<Metadata>>,
}

/// Raw nearest-neighbour rows returned by a database backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub distances: Vec<f32>,
}

/// Narrow interface onto a vector database
///
/// Implementations: [`crate::HttpVectorDatabase`] for a Chroma server and
/// [`crate::MemoryVectorDatabase`] for tests and offline runs.
#[async_trait::async_trait]
pub trait VectorDatabase: Send + Sync {
    /// Resolve a collection by name, creating it when missing
    async fn get_or_create_collection(&self, name: &str) -> Result<CollectionHandle>;

    /// Insert a batch of records into a collection
    async fn add(&self, collection: &CollectionHandle, batch: AddBatch) -> Result<()>;

    /// Nearest neighbours of `embedding` within a collection, closest first
    async fn query(
        &self,
        collection: &CollectionHandle,
        embedding: &[f32],
        n_results: usize,
    ) -> Result<QueryResponse>;
}

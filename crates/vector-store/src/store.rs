use crate::database::{AddBatch, CollectionHandle, VectorDatabase};
use crate::error::{Result, StoreError};
use crate::types::{Metadata, SearchResult};
use semdex_embedder::Embedder;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Named collection in a vector database, paired with an embedder
///
/// A store starts uninitialized. [`VectorStore::initialize`] resolves the
/// collection (creating it on first use) and moves the store to ready;
/// until then [`VectorStore::add_documents`] and [`VectorStore::search`]
/// fail with [`StoreError::NotInitialized`]. Initialization is idempotent
/// and a failed attempt can simply be retried.
pub struct VectorStore {
    db: Arc<dyn VectorDatabase>,
    embedder: Embedder,
    collection_name: String,
    collection: OnceCell<CollectionHandle>,
}

impl VectorStore {
    /// Create a store for `collection_name` without contacting the database
    #[must_use]
    pub fn new(
        db: Arc<dyn VectorDatabase>,
        embedder: Embedder,
        collection_name: impl Into<String>,
    ) -> Self {
        Self {
            db,
            embedder,
            collection_name: collection_name.into(),
            collection: OnceCell::new(),
        }
    }

    /// Resolve the backing collection, creating it when missing
    pub async fn initialize(&self) -> Result<()> {
        self.collection
            .get_or_try_init(|| async {
                log::info!("Initializing collection '{}'", self.collection_name);
                let handle = self
                    .db
                    .get_or_create_collection(&self.collection_name)
                    .await
                    .map_err(StoreError::init)?;
                log::info!("Collection '{}' ready (id: {})", handle.name, handle.id);
                Ok::<_, StoreError>(handle)
            })
            .await?;
        Ok(())
    }

    /// Whether the backing collection has been resolved
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.collection.initialized()
    }

    /// Name of the backing collection
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Embed `documents` and insert them under the given `ids`
    ///
    /// `metadatas`, when present, must parallel `ids`. An empty batch is a
    /// no-op that never touches the embedding model.
    pub async fn add_documents(
        &self,
        ids: Vec<String>,
        documents: Vec<String>,
        metadatas: Option<Vec<Metadata>>,
    ) -> Result<()> {
        let collection = self.collection()?;

        if documents.len() != ids.len() {
            return Err(StoreError::LengthMismatch {
                field: "documents",
                expected: ids.len(),
                actual: documents.len(),
            });
        }
        if let Some(metadatas) = &metadatas {
            if metadatas.len() != ids.len() {
                return Err(StoreError::LengthMismatch {
                    field: "metadatas",
                    expected: ids.len(),
                    actual: metadatas.len(),
                });
            }
        }
        if ids.is_empty() {
            return Ok(());
        }

        let embeddings = self.embedder.embed_batch(&documents).await?;
        let count = ids.len();
        let batch = AddBatch {
            ids,
            documents,
            embeddings,
            metadatas,
        };
        self.db.add(collection, batch).await?;

        log::info!("Added {} documents to '{}'", count, collection.name);
        Ok(())
    }

    /// Return the `top_k` nearest documents to `query`, closest first
    pub async fn search(&self, query: &str, top_k: usize) -> Result<SearchResult> {
        let collection = self.collection()?;
        log::debug!("Searching '{}' (top_k: {})", query, top_k);

        let embedding = self.embedder.generate_embedding(query).await?;
        let response = self.db.query(collection, &embedding, top_k).await?;
        log::debug!("Found {} results", response.ids.len());

        Ok(SearchResult {
            ids: response.ids,
            documents: response.documents,
            distances: response.distances,
        })
    }

    fn collection(&self) -> Result<&CollectionHandle> {
        self.collection.get().ok_or(StoreError::NotInitialized)
    }
}

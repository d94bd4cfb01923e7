use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::stats::IngestReport;
use crate::types::{ChunkRecord, Document};
use semdex_chunker::TextChunker;
use semdex_embedder::Embedder;
use semdex_vector_store::{SearchResult, VectorDatabase, VectorStore};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates chunking, embedding and storage for whole documents
///
/// The pipeline wires a [`TextChunker`] to a [`VectorStore`] and exposes
/// the two operations callers actually need: [`DocumentPipeline::ingest`]
/// for a file and [`DocumentPipeline::search`] for a query. Call
/// [`DocumentPipeline::initialize`] once before either.
pub struct DocumentPipeline {
    chunker: TextChunker,
    store: VectorStore,
    top_k: usize,
}

impl DocumentPipeline {
    /// Build a pipeline from a validated config, database and embedder
    pub fn new(
        config: &PipelineConfig,
        db: Arc<dyn VectorDatabase>,
        embedder: Embedder,
    ) -> Result<Self> {
        config.validate()?;
        let chunker = TextChunker::new(config.chunk_config())?;
        let store = VectorStore::new(db, embedder, config.collection_name.clone());

        Ok(Self {
            chunker,
            store,
            top_k: config.top_k,
        })
    }

    /// Resolve the backing collection, creating it when missing
    pub async fn initialize(&self) -> Result<()> {
        self.store.initialize().await?;
        Ok(())
    }

    /// Whether the backing collection has been resolved
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.store.is_initialized()
    }

    /// Read a file, chunk it and store every chunk
    ///
    /// Each chunk gets a fresh id and carries its source path and offsets
    /// as metadata. A file that fits one chunk window is stored whole.
    pub async fn ingest(&self, path: impl AsRef<Path>) -> Result<IngestReport> {
        let path = path.as_ref();
        let started = Instant::now();

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PipelineError::DocumentRead {
                path: path.to_path_buf(),
                source,
            })?;
        let document = Document::new(path.to_string_lossy().into_owned(), text);
        let characters = document.characters();

        let records: Vec<ChunkRecord> = self
            .chunker
            .chunk(&document.text)
            .into_iter()
            .map(|chunk| ChunkRecord::new(chunk, document.source_path.clone()))
            .collect();

        log::info!(
            "Ingesting {} ({} characters, {} chunks)",
            document.source_path,
            characters,
            records.len()
        );

        let mut ids = Vec::with_capacity(records.len());
        let mut documents = Vec::with_capacity(records.len());
        let mut metadatas = Vec::with_capacity(records.len());
        for record in records {
            ids.push(record.id.to_string());
            metadatas.push(record.metadata());
            documents.push(record.chunk.text);
        }
        let chunks = ids.len();

        self.store
            .add_documents(ids, documents, Some(metadatas))
            .await?;

        Ok(IngestReport {
            source_path: document.source_path,
            chunks,
            characters,
            time_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Return the `top_k` nearest chunks to `query`, closest first
    pub async fn search(&self, query: &str, top_k: usize) -> Result<SearchResult> {
        Ok(self.store.search(query, top_k).await?)
    }

    /// Search with the configured result count
    pub async fn search_default(&self, query: &str) -> Result<SearchResult> {
        self.search(query, self.top_k).await
    }

    /// Configured default result count
    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }
}

impl fmt::Debug for DocumentPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentPipeline")
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

//! # Semdex Pipeline
//!
//! End-to-end document indexing: read, chunk, embed, store, search.
//!
//! ```text
//!  ingest(path)                          search(query, top_k)
//!      │                                      │
//!      ▼                                      ▼
//!  read file ─> TextChunker ─> Embedder ─> VectorStore ─> SearchResult
//! ```
//!
//! [`DocumentPipeline`] is the only moving part; everything else is
//! configuration ([`PipelineConfig`]) and the reports it hands back.
//!
//! ## Example
//!
//! ```no_run
//! use semdex_embedder::{Embedder, FastembedLoader};
//! use semdex_pipeline::{DocumentPipeline, PipelineConfig};
//! use semdex_vector_store::HttpVectorDatabase;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::default();
//!     let db = Arc::new(HttpVectorDatabase::new(&config.endpoint)?);
//!     let embedder = Embedder::new(Arc::new(FastembedLoader::new()));
//!
//!     let pipeline = DocumentPipeline::new(&config, db, embedder)?;
//!     pipeline.initialize().await?;
//!
//!     let report = pipeline.ingest("notes/today.txt").await?;
//!     println!("stored {} chunks", report.chunks);
//!
//!     let results = pipeline.search_default("what did I write about rust?").await?;
//!     for (id, document, distance) in results.iter() {
//!         println!("{id} ({distance:.3}): {document}");
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod pipeline;
mod stats;
mod types;

pub use config::{PipelineConfig, DEFAULT_COLLECTION_NAME, DEFAULT_ENDPOINT, DEFAULT_TOP_K};
pub use error::{PipelineError, Result};
pub use pipeline::DocumentPipeline;
pub use stats::{BatchReport, IngestReport};
pub use types::{ChunkRecord, Document};

// Re-export the search result type for convenience
pub use semdex_vector_store::SearchResult;

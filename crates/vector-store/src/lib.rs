//! # Semdex Vector Store
//!
//! Named-collection vector storage behind a narrow database interface.
//!
//! A [`VectorStore`] owns one collection in a vector database plus the
//! [`Embedder`] used to turn text into vectors. The database itself sits
//! behind the [`VectorDatabase`] trait with two backends:
//!
//! ```text
//!               VectorStore ("documents")
//!                 │   initialize / add / search
//!                 ▼
//!             VectorDatabase
//!             ├── HttpVectorDatabase ──> Chroma REST API
//!             └── MemoryVectorDatabase ─> in-process map
//! ```
//!
//! The store starts uninitialized; [`VectorStore::initialize`] resolves
//! the collection and must succeed before documents can be added or
//! queried.
//!
//! ## Example
//!
//! ```no_run
//! use semdex_embedder::{Embedder, FastembedLoader};
//! use semdex_vector_store::{HttpVectorDatabase, VectorStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Arc::new(HttpVectorDatabase::new("http://127.0.0.1:8000")?);
//!     let embedder = Embedder::new(Arc::new(FastembedLoader::new()));
//!     let store = VectorStore::new(db, embedder, "documents");
//!
//!     store.initialize().await?;
//!     store
//!         .add_documents(
//!             vec!["doc-1".to_string()],
//!             vec!["hello world".to_string()],
//!             None,
//!         )
//!         .await?;
//!
//!     let results = store.search("greeting", 5).await?;
//!     for (id, document, distance) in results.iter() {
//!         println!("{id} ({distance:.3}): {document}");
//!     }
//!     Ok(())
//! }
//! ```

mod database;
mod error;
mod http;
mod memory;
mod store;
mod types;

pub use database::{AddBatch, CollectionHandle, QueryResponse, VectorDatabase};
pub use error::{Result, StoreError};
pub use http::{HttpVectorDatabase, DEFAULT_REQUEST_TIMEOUT};
pub use memory::MemoryVectorDatabase;
pub use store::VectorStore;
pub use types::{Metadata, SearchResult};

// Re-export the embedder handle for convenience
pub use semdex_embedder::Embedder;

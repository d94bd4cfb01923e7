//! # Semdex Embedder
//!
//! Text embedding with a lazily-loaded model.
//!
//! An [`Embedder`] is cheap to create and never touches the model up
//! front. The first embedding request loads the model through a
//! [`ModelLoader`] and caches the resulting backend; concurrent first
//! requests share a single load, and a failed load is retried on the
//! next request.
//!
//! ```text
//!   Embedder ──first request──> ModelLoader ──> EmbeddingBackend
//!      │                                             ▲
//!      └──────────── later requests ────────────────┘
//! ```
//!
//! Two loaders ship with the crate: [`FastembedLoader`] runs a local
//! [fastembed](https://crates.io/crates/fastembed) model, and
//! [`StubLoader`] produces deterministic hash-seeded vectors for tests.
//!
//! ## Example
//!
//! ```no_run
//! use semdex_embedder::{Embedder, FastembedLoader};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let embedder = Embedder::new(Arc::new(FastembedLoader::new()));
//!
//!     // The model loads here, on the first request
//!     let embedding = embedder.generate_embedding("hello world").await?;
//!     println!("dimension: {}", embedding.len());
//!     Ok(())
//! }
//! ```

mod embedder;
mod error;
mod fastembed;
mod model;
mod stub;

pub use embedder::Embedder;
pub use error::{EmbedderError, Result};
pub use model::{cosine_similarity, EmbeddingBackend, ModelLoader};
pub use self::fastembed::FastembedLoader;
pub use stub::{stub_embed, StubBackend, StubLoader};

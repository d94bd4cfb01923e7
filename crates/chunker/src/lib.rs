//! # Semdex Chunker
//!
//! Sliding-window text chunking for semantic indexing.
//!
//! ## Behavior
//!
//! Documents are split into fixed-width windows of characters sharing a
//! configurable overlap, so context near a boundary lands in both
//! neighboring chunks.
//!
//! ```text
//! Document text
//!     │
//!     ├──> window 0: [0, size)
//!     ├──> window 1: [step, step + size)      step = size - overlap
//!     ├──> window 2: [2*step, 2*step + size)
//!     └──> last window ends exactly at the text length
//! ```
//!
//! ## Example
//!
//! ```rust
//! use semdex_chunker::{ChunkConfig, TextChunker};
//!
//! let chunker = TextChunker::new(ChunkConfig::new(100, 20)).unwrap();
//! let chunks = chunker.chunk(&"a".repeat(150));
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[1].start_offset, 80);
//! assert_eq!(chunks[1].length, 70);
//! ```

mod chunker;
mod config;
mod error;
mod types;

pub use chunker::TextChunker;
pub use config::{ChunkConfig, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use error::{ChunkerError, Result};
pub use types::Chunk;

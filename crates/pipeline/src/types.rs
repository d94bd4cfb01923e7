use semdex_chunker::Chunk;
use semdex_vector_store::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document read from disk, addressed by the path it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub source_path: String,
    pub text: String,
}

impl Document {
    #[must_use]
    pub const fn new(source_path: String, text: String) -> Self {
        Self { source_path, text }
    }

    /// Document length in characters
    #[must_use]
    pub fn characters(&self) -> usize {
        self.text.chars().count()
    }
}

/// One chunk of a document, addressed by a fresh id and ready for storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: Uuid,
    pub chunk: Chunk,
    pub source_path: String,
}

impl ChunkRecord {
    #[must_use]
    pub fn new(chunk: Chunk, source_path: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            chunk,
            source_path,
        }
    }

    /// Metadata row stored alongside the chunk text
    #[must_use]
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("source_path".to_string(), self.source_path.clone().into());
        metadata.insert("start_offset".to_string(), self.chunk.start_offset.into());
        metadata.insert("length".to_string(), self.chunk.length.into());
        metadata
    }
}

use serde::{Deserialize, Serialize};

/// A contiguous slice of a source document, sized for embedding
///
/// Offsets and lengths are counted in characters, not bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text
    pub text: String,

    /// Offset of the first character within the source document
    pub start_offset: usize,

    /// Chunk length in characters
    pub length: usize,
}

impl Chunk {
    /// Create a new chunk
    #[must_use]
    pub const fn new(text: String, start_offset: usize, length: usize) -> Self {
        Self {
            text,
            start_offset,
            length,
        }
    }

    /// Offset one past the last character of this chunk
    #[must_use]
    pub const fn end_offset(&self) -> usize {
        self.start_offset + self.length
    }

    /// Check whether the chunk covers a character offset
    #[must_use]
    pub const fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start_offset && offset < self.end_offset()
    }
}

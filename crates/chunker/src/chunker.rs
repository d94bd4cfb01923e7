use crate::config::ChunkConfig;
use crate::error::Result;
use crate::types::Chunk;

/// Splits documents into overlapping windows of characters
///
/// Chunking is pure: the same input always yields the same chunks, in
/// document order.
pub struct TextChunker {
    config: ChunkConfig,
}

impl TextChunker {
    /// Create a chunker, rejecting window geometry that cannot advance
    pub fn new(config: ChunkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Split `text` into overlapping chunks
    ///
    /// Empty input yields no chunks; input no longer than the window yields
    /// exactly one chunk spanning the whole text. Otherwise windows of
    /// `chunk_size` characters advance by `chunk_size - chunk_overlap` until
    /// the last window ends exactly at the end of the text. The final chunk
    /// may be shorter than the window.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character boundary, with the end of the
        // string appended, so character ranges map onto valid slice bounds.
        let mut boundaries: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
        boundaries.push(text.len());
        let total_chars = boundaries.len() - 1;

        let size = self.config.chunk_size;
        if total_chars <= size {
            return vec![Chunk::new(text.to_string(), 0, total_chars)];
        }

        let step = self.config.step();
        let mut chunks = Vec::with_capacity(total_chars / step + 1);
        let mut start = 0;
        while start < total_chars {
            let end = (start + size).min(total_chars);
            let slice = &text[boundaries[start]..boundaries[end]];
            chunks.push(Chunk::new(slice.to_string(), start, end - start));
            if end == total_chars {
                break;
            }
            start += step;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunker(size: usize, overlap: usize) -> TextChunker {
        TextChunker::new(ChunkConfig::new(size, overlap)).expect("valid config")
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert_eq!(chunker(100, 20).chunk(""), Vec::new());
    }

    #[test]
    fn test_short_text_yields_single_chunk() {
        let chunks = chunker(100, 20).chunk("hello world");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "hello world");
        assert_eq!(chunks[0].start_offset, 0);
        assert_eq!(chunks[0].length, 11);
    }

    #[test]
    fn test_text_exactly_window_sized_yields_single_chunk() {
        let text = "a".repeat(100);
        let chunks = chunker(100, 20).chunk(&text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].length, 100);
    }

    #[test]
    fn test_150_chars_size_100_overlap_20() {
        let text = "a".repeat(150);
        let chunks = chunker(100, 20).chunk(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].start_offset, 0);
        assert_eq!(chunks[0].length, 100);
        assert_eq!(chunks[1].start_offset, 80);
        assert_eq!(chunks[1].length, 70);
    }

    #[test]
    fn test_260_chars_size_100_overlap_20() {
        let text = "a".repeat(260);
        let chunks = chunker(100, 20).chunk(&text);
        assert_eq!(chunks.len(), 3);
        let offsets: Vec<usize> = chunks.iter().map(|c| c.start_offset).collect();
        assert_eq!(offsets, vec![0, 80, 160]);
        assert!(chunks.iter().all(|c| c.length == 100));
    }

    #[test]
    fn test_no_empty_trailing_chunk_on_aligned_length() {
        // 180 = step + size, so the second window ends exactly at the text
        // length and nothing follows it.
        let text = "b".repeat(180);
        let chunks = chunker(100, 20).chunk(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].start_offset, 80);
        assert_eq!(chunks[1].length, 100);
        assert!(chunks.iter().all(|c| c.length > 0));
    }

    #[test]
    fn test_every_character_is_covered() {
        let text: String = ('a'..='z').cycle().take(437).collect();
        let chunks = chunker(64, 16).chunk(&text);

        let total = text.chars().count();
        for offset in 0..total {
            assert!(
                chunks.iter().any(|c| c.contains_offset(offset)),
                "offset {offset} not covered"
            );
        }
        assert_eq!(chunks.last().map(Chunk::end_offset), Some(total));
    }

    #[test]
    fn test_offsets_are_monotonic_and_reconstruct_text() {
        let text: String = ('a'..='z').cycle().take(311).collect();
        let chunks = chunker(50, 10).chunk(&text);

        let mut previous_start = 0;
        for chunk in &chunks {
            assert!(chunk.start_offset >= previous_start);
            previous_start = chunk.start_offset;
        }

        // Dropping each chunk's overlap with its predecessor rebuilds the
        // original text.
        let mut rebuilt = String::new();
        let mut covered = 0;
        for chunk in &chunks {
            let skip = covered - chunk.start_offset;
            rebuilt.extend(chunk.text.chars().skip(skip));
            covered = chunk.end_offset();
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_multibyte_text_slices_on_char_boundaries() {
        let text: String = "héllo wörld ".repeat(12);
        let total = text.chars().count();
        let chunks = chunker(40, 10).chunk(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert_eq!(chunk.text.chars().count(), chunk.length);
        }
        assert_eq!(chunks.last().map(Chunk::end_offset), Some(total));
    }

    #[test]
    fn test_chunking_is_deterministic() {
        let text: String = ('a'..='z').cycle().take(500).collect();
        let chunker = chunker(100, 25);
        assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
    }

    #[test]
    fn test_invalid_geometry_is_rejected_at_construction() {
        assert!(TextChunker::new(ChunkConfig::new(100, 100)).is_err());
        assert!(TextChunker::new(ChunkConfig::new(100, 120)).is_err());
        assert!(TextChunker::new(ChunkConfig::new(0, 0)).is_err());
    }
}

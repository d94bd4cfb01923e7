use crate::error::Result;
use crate::model::{normalize, EmbeddingBackend, ModelLoader};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Deterministic hash-seeded embedding backend for tests and offline runs
///
/// Vectors are unit-normalized and depend only on the input text and the
/// configured dimension, so equal texts always land on identical vectors.
#[derive(Clone)]
pub struct StubBackend {
    dimension: usize,
    batch_calls: Arc<AtomicUsize>,
}

impl StubBackend {
    /// Create a stub producing vectors of the given dimension
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            batch_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of batch embed calls served so far
    #[must_use]
    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::Relaxed)
    }
}

impl EmbeddingBackend for StubBackend {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.batch_calls.fetch_add(1, Ordering::Relaxed);
        Ok(texts
            .iter()
            .map(|text| stub_embed(text, self.dimension))
            .collect())
    }
}

/// Model loader handing out stub backends, counting load attempts
pub struct StubLoader {
    dimension: usize,
    loads: Arc<AtomicUsize>,
}

impl StubLoader {
    /// Create a loader for stub backends of the given dimension
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of loads performed so far
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ModelLoader for StubLoader {
    async fn load(&self) -> anyhow::Result<Arc<dyn EmbeddingBackend>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(StubBackend::new(self.dimension)))
    }
}

/// Deterministic pseudo-random unit vector seeded from `text`
#[must_use]
pub fn stub_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut state =
        fnv1a_64(text.as_bytes()) ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vec = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        let high = (bits >> 32) as u32;
        let mantissa = high >> 9;
        let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
        vec.push(unit.mul_add(2.0, -1.0));
    }
    normalize(&mut vec);
    vec
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stub_embed_is_deterministic() {
        assert_eq!(stub_embed("hello", 16), stub_embed("hello", 16));
    }

    #[test]
    fn test_stub_embed_varies_by_text_and_dimension() {
        assert_ne!(stub_embed("hello", 16), stub_embed("world", 16));
        assert_ne!(stub_embed("hello", 16)[..8], stub_embed("hello", 8)[..]);
    }

    #[test]
    fn test_stub_embed_is_unit_length() {
        let vec = stub_embed("some text", 32);
        assert_eq!(vec.len(), 32);
        let norm: f32 = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stub_backend_counts_batches() {
        let backend = StubBackend::new(8);
        let texts = vec!["a".to_string(), "b".to_string()];
        let first = backend.embed_batch(&texts).expect("embed");
        let second = backend.embed_batch(&texts).expect("embed");
        assert_eq!(backend.batch_calls(), 2);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0], stub_embed("a", 8));
    }
}

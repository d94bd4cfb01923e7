use crate::error::Result;
use std::sync::Arc;

/// A loaded embedding model
///
/// Implementations are invoked from blocking contexts and must be safe to
/// share across threads once loaded.
pub trait EmbeddingBackend: Send + Sync {
    /// Embedding dimension produced by this model
    fn dimension(&self) -> usize;

    /// Embed a batch of texts, order-aligned with the input
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Loads an embedding model on first use
///
/// Loaders are injected into [`crate::Embedder`] at construction; the load
/// runs at most once per embedder unless it fails, in which case a later
/// call may retry.
#[async_trait::async_trait]
pub trait ModelLoader: Send + Sync {
    /// Load the model, returning a shared handle
    async fn load(&self) -> anyhow::Result<Arc<dyn EmbeddingBackend>>;
}

/// Cosine similarity between two vectors
///
/// Mismatched lengths and zero-norm inputs score 0.0 instead of erroring.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Scale a vector to unit length in place; zero vectors are left untouched
pub(crate) fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

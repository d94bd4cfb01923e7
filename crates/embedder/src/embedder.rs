use crate::error::{EmbedderError, Result};
use crate::model::{EmbeddingBackend, ModelLoader};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Lazily-loaded embedding model handle
///
/// Construction is cheap and never touches the model. The model is loaded
/// on the first embedding request and cached for the lifetime of the
/// handle. Concurrent first requests share a single load: one caller runs
/// the loader while the rest wait for its outcome. A failed load leaves
/// the handle unloaded, so a later request retries from scratch.
///
/// Cloning is cheap and clones share the same cached model.
#[derive(Clone)]
pub struct Embedder {
    inner: Arc<Inner>,
}

struct Inner {
    loader: Arc<dyn ModelLoader>,
    backend: OnceCell<Arc<dyn EmbeddingBackend>>,
}

impl Embedder {
    /// Create an embedder around a model loader without loading anything
    #[must_use]
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            inner: Arc::new(Inner {
                loader,
                backend: OnceCell::new(),
            }),
        }
    }

    /// Embed a single text, loading the model first if needed
    pub async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let mut batch = self.embed_batch(&[text.to_string()]).await?;
        batch
            .pop()
            .ok_or_else(|| EmbedderError::embedding("Empty embedding result"))
    }

    /// Embed a batch of texts, preserving input order
    ///
    /// An empty batch returns an empty result without loading the model.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let backend = self.backend().await?;
        let owned = texts.to_vec();
        let embeddings = tokio::task::spawn_blocking(move || backend.embed_batch(&owned))
            .await
            .map_err(|e| EmbedderError::Task(e.to_string()))??;

        if embeddings.len() != texts.len() {
            return Err(EmbedderError::embedding(format!(
                "Expected {} embeddings, model returned {}",
                texts.len(),
                embeddings.len()
            )));
        }
        Ok(embeddings)
    }

    /// Output dimension of the model, loading it first if needed
    pub async fn dimension(&self) -> Result<usize> {
        Ok(self.backend().await?.dimension())
    }

    async fn backend(&self) -> Result<Arc<dyn EmbeddingBackend>> {
        let backend = self
            .inner
            .backend
            .get_or_try_init(|| async {
                log::info!("Loading embedding model");
                let backend = self.inner.loader.load().await?;
                log::info!(
                    "Embedding model ready (dimension {})",
                    backend.dimension()
                );
                Ok::<_, EmbedderError>(backend)
            })
            .await?;
        Ok(Arc::clone(backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{stub_embed, StubBackend, StubLoader};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Loader failing its first `failures` attempts, then succeeding
    struct FlakyLoader {
        failures: usize,
        dimension: usize,
        attempts: Arc<AtomicUsize>,
    }

    impl FlakyLoader {
        fn new(failures: usize, dimension: usize) -> Self {
            Self {
                failures,
                dimension,
                attempts: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait::async_trait]
    impl ModelLoader for FlakyLoader {
        async fn load(&self) -> anyhow::Result<Arc<dyn EmbeddingBackend>> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                anyhow::bail!("transient load failure");
            }
            Ok(Arc::new(StubBackend::new(self.dimension)))
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_requests_share_one_load() {
        let loader = Arc::new(StubLoader::new(16));
        let embedder = Embedder::new(loader.clone());

        let left = {
            let embedder = embedder.clone();
            tokio::spawn(async move { embedder.generate_embedding("same text").await })
        };
        let right = {
            let embedder = embedder.clone();
            tokio::spawn(async move { embedder.generate_embedding("same text").await })
        };

        let (left, right) = tokio::join!(left, right);
        let left = left.expect("join").expect("embed");
        let right = right.expect("join").expect("embed");

        assert_eq!(loader.loads(), 1);
        assert_eq!(left, right);
    }

    #[tokio::test]
    async fn test_failed_load_is_retried_on_next_request() {
        let loader = Arc::new(FlakyLoader::new(1, 8));
        let attempts = loader.attempts.clone();
        let embedder = Embedder::new(loader);

        let err = embedder
            .generate_embedding("text")
            .await
            .expect_err("first load should fail");
        assert!(matches!(err, EmbedderError::ModelLoad(_)));

        let embedding = embedder
            .generate_embedding("text")
            .await
            .expect("second load should succeed");
        assert_eq!(embedding.len(), 8);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_length() {
        let embedder = Embedder::new(Arc::new(StubLoader::new(12)));
        let texts = vec![
            "alpha".to_string(),
            "beta".to_string(),
            "gamma".to_string(),
        ];

        let embeddings = embedder.embed_batch(&texts).await.expect("embed");

        assert_eq!(embeddings.len(), 3);
        for (text, embedding) in texts.iter().zip(&embeddings) {
            assert_eq!(embedding, &stub_embed(text, 12));
        }
    }

    #[tokio::test]
    async fn test_empty_batch_skips_model_load() {
        let loader = Arc::new(StubLoader::new(16));
        let embedder = Embedder::new(loader.clone());

        let embeddings = embedder.embed_batch(&[]).await.expect("embed");

        assert!(embeddings.is_empty());
        assert_eq!(loader.loads(), 0);
    }

    #[tokio::test]
    async fn test_single_embedding_matches_batch() {
        let embedder = Embedder::new(Arc::new(StubLoader::new(16)));

        let single = embedder.generate_embedding("alpha").await.expect("embed");
        let batch = embedder
            .embed_batch(&["alpha".to_string()])
            .await
            .expect("embed");

        assert_eq!(vec![single], batch);
    }

    #[tokio::test]
    async fn test_dimension_loads_the_model() {
        let loader = Arc::new(StubLoader::new(24));
        let embedder = Embedder::new(loader.clone());

        assert_eq!(embedder.dimension().await.expect("dimension"), 24);
        assert_eq!(loader.loads(), 1);
    }
}

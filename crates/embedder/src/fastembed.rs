use crate::error::{EmbedderError, Result};
use crate::model::{normalize, EmbeddingBackend, ModelLoader};
use ::fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use anyhow::Context;
use std::sync::{Arc, Mutex};

/// Loader for local [fastembed](https://crates.io/crates/fastembed) models
///
/// The first load downloads the model files into the fastembed cache
/// directory, so it can take a while on a cold machine. Subsequent loads
/// read from disk.
pub struct FastembedLoader {
    model: EmbeddingModel,
}

impl FastembedLoader {
    /// Loader for the default model (`all-MiniLM-L6-v2`, 384 dimensions)
    #[must_use]
    pub fn new() -> Self {
        Self::with_model(EmbeddingModel::AllMiniLML6V2)
    }

    /// Loader for a specific fastembed model
    #[must_use]
    pub const fn with_model(model: EmbeddingModel) -> Self {
        Self { model }
    }
}

impl Default for FastembedLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ModelLoader for FastembedLoader {
    async fn load(&self) -> anyhow::Result<Arc<dyn EmbeddingBackend>> {
        let model = self.model.clone();
        log::debug!("Initializing fastembed model {model}");
        let backend = tokio::task::spawn_blocking(move || FastembedBackend::load(model))
            .await
            .context("Model load task failed")??;
        Ok(Arc::new(backend))
    }
}

/// Backend wrapping a loaded fastembed session
///
/// `TextEmbedding::embed` needs `&mut self`, so the session sits behind a
/// mutex and batches are serialized through it.
struct FastembedBackend {
    session: Mutex<TextEmbedding>,
    dimension: usize,
}

impl FastembedBackend {
    fn load(model: EmbeddingModel) -> anyhow::Result<Self> {
        let mut session = TextEmbedding::try_new(InitOptions::new(model))
            .context("Failed to initialize fastembed model")?;

        // The model info does not expose the output width, so probe it
        let probe_texts = vec!["dimension probe".to_string()];
        let probe = session
            .embed(&probe_texts, None)
            .context("Failed to probe embedding dimension")?;
        let dimension = probe
            .first()
            .map(Vec::len)
            .context("Embedding model returned an empty probe result")?;

        Ok(Self {
            session: Mutex::new(session),
            dimension,
        })
    }
}

impl EmbeddingBackend for FastembedBackend {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut session = self
            .session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut embeddings = session
            .embed(texts, None)
            .map_err(|e| EmbedderError::embedding(e.to_string()))?;

        for embedding in &mut embeddings {
            normalize(embedding);
        }
        Ok(embeddings)
    }
}

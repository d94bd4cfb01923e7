use thiserror::Error;

/// Result type for embedding operations
pub type Result<T> = std::result::Result<T, EmbedderError>;

/// Errors that can occur while loading models or generating embeddings
#[derive(Error, Debug)]
pub enum EmbedderError {
    /// The embedding model failed to initialize
    #[error("Model load failed: {0}")]
    ModelLoad(#[from] anyhow::Error),

    /// Embedding generation failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// A blocking embedding task was cancelled or panicked
    #[error("Embedding task failed: {0}")]
    Task(String),
}

impl EmbedderError {
    /// Create an embedding error
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::Embedding(msg.into())
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store initialization failed: {0}")]
    Init(#[source] Box<StoreError>),

    #[error("Vector store is not initialized")]
    NotInitialized,

    #[error("Vector database request timed out: {0}")]
    Timeout(String),

    #[error("Vector database transport error: {0}")]
    Transport(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Embedding error: {0}")]
    Embedder(#[from] semdex_embedder::EmbedderError),

    #[error("Length mismatch for {field}: expected {expected}, got {actual}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl StoreError {
    /// Wrap a failure that happened while resolving the collection
    #[must_use]
    pub fn init(cause: Self) -> Self {
        Self::Init(Box::new(cause))
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

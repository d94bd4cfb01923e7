use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config {}: {detail}", .path.display())]
    ConfigLoad { path: PathBuf, detail: String },

    #[error("Failed to read document {}: {source}", .path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Chunker error: {0}")]
    Chunker(#[from] semdex_chunker::ChunkerError),

    #[error("Vector store error: {0}")]
    Store(#[from] semdex_vector_store::StoreError),
}

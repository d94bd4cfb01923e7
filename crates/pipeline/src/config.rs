use crate::error::{PipelineError, Result};
use semdex_chunker::{ChunkConfig, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_COLLECTION_NAME: &str = "documents";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TOP_K: usize = 5;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Pipeline configuration
///
/// Every field has a default, so a TOML config file only needs the keys
/// it wants to override:
///
/// ```toml
/// chunk_size = 1000
/// chunk_overlap = 200
/// collection_name = "documents"
/// endpoint = "http://127.0.0.1:8000"
/// request_timeout_secs = 30
/// top_k = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Chunk window size in characters
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,

    /// Name of the vector database collection
    pub collection_name: String,

    /// Base URL of the vector database
    pub endpoint: String,

    /// Per-request timeout for database calls, in seconds
    pub request_timeout_secs: u64,

    /// Default number of search results
    pub top_k: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl PipelineConfig {
    /// Load and validate a TOML config file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::ConfigLoad {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| PipelineError::ConfigLoad {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Chunking geometry described by this config
    #[must_use]
    pub const fn chunk_config(&self) -> ChunkConfig {
        ChunkConfig::new(self.chunk_size, self.chunk_overlap)
    }

    /// Per-request timeout as a [`Duration`]
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check all fields, including the chunking geometry
    pub fn validate(&self) -> Result<()> {
        self.chunk_config().validate()?;
        if self.collection_name.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "collection_name must not be empty".to_string(),
            ));
        }
        if self.endpoint.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "endpoint must not be empty".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(PipelineError::InvalidConfig(
                "top_k must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 200);
        assert_eq!(config.collection_name, "documents");
        assert_eq!(config.endpoint, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.top_k, 5);
        config.validate().expect("defaults should be valid");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: PipelineConfig =
            toml::from_str("chunk_size = 500\ntop_k = 10\n").expect("parse");
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.chunk_overlap, DEFAULT_CHUNK_OVERLAP);
        assert_eq!(config.collection_name, DEFAULT_COLLECTION_NAME);
    }

    #[test]
    fn test_invalid_geometry_is_rejected() {
        let config = PipelineConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            ..Default::default()
        };
        let err = config.validate().expect_err("should reject");
        assert!(matches!(err, PipelineError::Chunker(_)));
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        let config = PipelineConfig {
            collection_name: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfig(_))
        ));

        let config = PipelineConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("semdex.toml");
        std::fs::write(&path, "collection_name = \"notes\"\n").expect("write");

        let config = PipelineConfig::from_toml_file(&path).expect("load");
        assert_eq!(config.collection_name, "notes");
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);

        let err = PipelineConfig::from_toml_file(dir.path().join("missing.toml"))
            .expect_err("missing file should fail");
        assert!(matches!(err, PipelineError::ConfigLoad { .. }));
    }
}

use serde::{Deserialize, Serialize};

/// Summary of a single document ingest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    /// Path the document was read from
    pub source_path: String,

    /// Number of chunks stored
    pub chunks: usize,

    /// Document length in characters
    pub characters: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,
}

/// Aggregate over a batch of ingests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of documents ingested successfully
    pub files: usize,

    /// Total chunks stored
    pub chunks: usize,

    /// Total characters processed
    pub characters: usize,

    /// Total time taken in milliseconds
    pub time_ms: u64,

    /// Errors encountered, one message per failed document
    pub errors: Vec<String>,
}

impl BatchReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_report(&mut self, report: &IngestReport) {
        self.files += 1;
        self.chunks += report.chunks;
        self.characters += report.characters;
        self.time_ms += report.time_ms;
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }
}

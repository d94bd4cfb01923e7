use serde::{Deserialize, Serialize};

/// Arbitrary per-document metadata stored alongside each record
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Ranked result set returned by a similarity search
///
/// The three columns are parallel: `ids[i]`, `documents[i]` and
/// `distances[i]` describe the same match. Results are ordered by
/// ascending distance, nearest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub distances: Vec<f32>,
}

impl SearchResult {
    /// Result set with no matches
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of matches
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate matches as `(id, document, distance)` rows
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f32)> {
        self.ids
            .iter()
            .zip(&self.documents)
            .zip(&self.distances)
            .map(|((id, document), distance)| (id.as_str(), document.as_str(), *distance))
    }
}

use crate::database::{AddBatch, CollectionHandle, QueryResponse, VectorDatabase};
use crate::error::{Result, StoreError};
use crate::types::Metadata;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-request timeout applied when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Vector database backend speaking the Chroma v1 REST API
///
/// All calls go through a pooled [`reqwest::Client`] with a per-request
/// timeout. Timeouts surface as [`StoreError::Timeout`], every other
/// transport or server failure as [`StoreError::Transport`].
pub struct HttpVectorDatabase {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVectorDatabase {
    /// Connect to a Chroma server, e.g. `http://127.0.0.1:8000`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Connect with an explicit per-request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn collections_url(&self) -> String {
        format!("{}/api/v1/collections", self.base_url)
    }

    fn collection_url(&self, collection_id: &str, action: &str) -> String {
        format!(
            "{}/api/v1/collections/{}/{}",
            self.base_url, collection_id, action
        )
    }

    /// POST a JSON body and fail on a non-success status
    async fn send<B: Serialize>(&self, url: &str, body: &B) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StoreError::transport(format!(
                "{url} returned {status}: {detail}"
            )));
        }
        Ok(response)
    }

    /// POST a JSON body and deserialize the JSON response
    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: for<'de> Deserialize<'de>,
    {
        let response = self.send(url, body).await?;
        response.json().await.map_err(classify_transport)
    }
}

fn classify_transport(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::timeout(err.to_string())
    } else {
        StoreError::transport(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    get_or_create: bool,
}

#[derive(Debug, Deserialize)]
struct CreateCollectionResponse {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct AddRequest {
    ids: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    documents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadatas: Option<Vec<Metadata>>,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query_embeddings: Vec<&'a [f32]>,
    n_results: usize,
    include: Vec<&'a str>,
}

/// Query response as Chroma returns it: one row of nested arrays per
/// query embedding. We always send exactly one embedding, so only the
/// first row matters.
#[derive(Debug, Deserialize)]
struct QueryResponseWire {
    ids: Vec<Vec<String>>,
    #[serde(default)]
    documents: Option<Vec<Vec<Option<String>>>>,
    #[serde(default)]
    distances: Option<Vec<Vec<f32>>>,
}

impl QueryResponseWire {
    fn into_response(self) -> QueryResponse {
        let ids = self.ids.into_iter().next().unwrap_or_default();
        let documents = self
            .documents
            .and_then(|rows| rows.into_iter().next())
            .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
            .unwrap_or_default();
        let distances = self
            .distances
            .and_then(|rows| rows.into_iter().next())
            .unwrap_or_default();

        QueryResponse {
            ids,
            documents,
            distances,
        }
    }
}

#[async_trait::async_trait]
impl VectorDatabase for HttpVectorDatabase {
    async fn get_or_create_collection(&self, name: &str) -> Result<CollectionHandle> {
        let request = CreateCollectionRequest {
            name,
            get_or_create: true,
        };
        let response: CreateCollectionResponse =
            self.post_json(&self.collections_url(), &request).await?;

        Ok(CollectionHandle {
            id: response.id,
            name: response.name,
        })
    }

    async fn add(&self, collection: &CollectionHandle, batch: AddBatch) -> Result<()> {
        let request = AddRequest {
            ids: batch.ids,
            embeddings: batch.embeddings,
            documents: batch.documents,
            metadatas: batch.metadatas,
        };
        self.send(&self.collection_url(&collection.id, "add"), &request)
            .await?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &CollectionHandle,
        embedding: &[f32],
        n_results: usize,
    ) -> Result<QueryResponse> {
        let request = QueryRequest {
            query_embeddings: vec![embedding],
            n_results,
            include: vec!["documents", "distances"],
        };
        let wire: QueryResponseWire = self
            .post_json(&self.collection_url(&collection.id, "query"), &request)
            .await?;
        Ok(wire.into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let db = HttpVectorDatabase::new("http://localhost:8000/").expect("client");
        assert_eq!(db.collections_url(), "http://localhost:8000/api/v1/collections");
        assert_eq!(
            db.collection_url("abc", "query"),
            "http://localhost:8000/api/v1/collections/abc/query"
        );
    }

    #[test]
    fn test_create_collection_request_shape() {
        let request = CreateCollectionRequest {
            name: "documents",
            get_or_create: true,
        };
        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            json!({"name": "documents", "get_or_create": true})
        );
    }

    #[test]
    fn test_add_request_omits_missing_metadatas() {
        let request = AddRequest {
            ids: vec!["a".to_string()],
            embeddings: vec![vec![0.5, 0.5]],
            documents: vec!["text".to_string()],
            metadatas: None,
        };
        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            json!({
                "ids": ["a"],
                "embeddings": [[0.5, 0.5]],
                "documents": ["text"],
            })
        );
    }

    #[test]
    fn test_query_request_shape() {
        let embedding = vec![0.25, 0.75];
        let request = QueryRequest {
            query_embeddings: vec![&embedding],
            n_results: 5,
            include: vec!["documents", "distances"],
        };
        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            json!({
                "query_embeddings": [[0.25, 0.75]],
                "n_results": 5,
                "include": ["documents", "distances"],
            })
        );
    }

    #[test]
    fn test_query_response_flattens_first_row() {
        let wire: QueryResponseWire = serde_json::from_value(json!({
            "ids": [["a", "b"]],
            "documents": [["first", null]],
            "distances": [[0.1, 0.2]],
        }))
        .expect("deserialize");

        let response = wire.into_response();
        assert_eq!(response.ids, vec!["a", "b"]);
        assert_eq!(response.documents, vec!["first", ""]);
        assert_eq!(response.distances, vec![0.1, 0.2]);
    }

    #[test]
    fn test_query_response_without_optional_panels() {
        let wire: QueryResponseWire =
            serde_json::from_value(json!({"ids": [[]]})).expect("deserialize");

        let response = wire.into_response();
        assert_eq!(response, QueryResponse::default());
    }
}

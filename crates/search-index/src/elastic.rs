use crate::SearchIndex;
use crate::error::SearchError;
use crate::responses::SearchResponse;
use async_trait::async_trait;
use core_types::Indexed;
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use std::marker::PhantomData;

/// A concrete `SearchIndex` implementation backed by the HTTP API of an
/// Elasticsearch-compatible node. Documents for `T` live in the index named
/// by `T::INDEX` and are keyed by the entity store's id.
#[derive(Debug, Clone)]
pub struct ElasticIndex<T> {
    client: reqwest::Client,
    base_url: String,
    _record: PhantomData<fn() -> T>,
}

impl<T: Indexed> ElasticIndex<T> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            _record: PhantomData,
        }
    }

    fn doc_url(&self, id: i64) -> String {
        format!("{}/{}/_doc/{}", self.base_url, T::INDEX, id)
    }

    fn search_url(&self) -> String {
        format!("{}/{}/_search", self.base_url, T::INDEX)
    }
}

/// Builds the `_search` request body: a query-string query against all
/// indexed fields, so expressions like `id:42` or bare terms both work.
pub(crate) fn query_body(query: &str) -> serde_json::Value {
    json!({
        "query": {
            "query_string": {
                "query": query
            }
        }
    })
}

/// A delete is done when the index dropped the document or never had it.
fn delete_succeeded(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::NOT_FOUND
}

async fn reject(status: StatusCode, response: reqwest::Response) -> SearchError {
    let body = response.text().await.unwrap_or_default();
    SearchError::IndexError {
        status: status.as_u16(),
        body,
    }
}

#[async_trait]
impl<T> SearchIndex<T> for ElasticIndex<T>
where
    T: Indexed + Serialize + DeserializeOwned + Send + Sync,
{
    async fn save(&self, record: &T) -> Result<(), SearchError> {
        let id = record.id().ok_or(SearchError::MissingId)?;
        let response = self
            .client
            .put(self.doc_url(id))
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(reject(status, response).await)
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), SearchError> {
        let response = self.client.delete(self.doc_url(id)).send().await?;

        let status = response.status();
        if delete_succeeded(status) {
            Ok(())
        } else {
            Err(reject(status, response).await)
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<T>, SearchError> {
        let response = self
            .client
            .post(self.search_url())
            .json(&query_body(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(reject(status, response).await);
        }

        let text = response.text().await?;
        let parsed = serde_json::from_str::<SearchResponse<T>>(&text)
            .map_err(|e| SearchError::Deserialization(e.to_string()))?;
        Ok(parsed.into_records())
    }
}

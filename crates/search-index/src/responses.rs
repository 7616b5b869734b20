use serde::Deserialize;

/// The envelope of an Elasticsearch `_search` response; only the parts this
/// crate reads are modeled.
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    pub hits: HitsEnvelope<T>,
}

#[derive(Debug, Deserialize)]
pub struct HitsEnvelope<T> {
    pub hits: Vec<Hit<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Hit<T> {
    #[serde(rename = "_source")]
    pub source: T,
}

impl<T> SearchResponse<T> {
    /// Unwraps the hits into the indexed records, keeping relevance order.
    pub fn into_records(self) -> Vec<T> {
        self.hits.hits.into_iter().map(|hit| hit.source).collect()
    }
}

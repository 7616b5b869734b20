use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("The record carries no id to key its index document by")]
    MissingId,

    #[error("Failed to reach the search index: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The search index rejected the request with status {status}: {body}")]
    IndexError { status: u16, body: String },

    #[error("Failed to deserialize a search index response: {0}")]
    Deserialization(String),
}

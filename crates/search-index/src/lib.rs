//! # Campus Search Index Crate
//!
//! The derived, query-optimized copy of the entity records. Every document
//! is keyed by the entity store's id; the store stays the system of record
//! and this index is never read-authoritative.

use async_trait::async_trait;

pub mod elastic;
pub mod error;
pub mod responses;

// --- Public API ---
pub use elastic::ElasticIndex;
pub use error::SearchError;

/// The generic, abstract interface to the search index for one record type.
/// This trait is the contract the web layer uses, allowing the underlying
/// implementation (live or mock) to be swapped out.
#[async_trait]
pub trait SearchIndex<T>: Send + Sync {
    /// Upserts the record as a document keyed by its id. The record must
    /// already carry a store-assigned id.
    async fn save(&self, record: &T) -> Result<(), SearchError>;

    /// Removes the document for `id` if present. Deleting an id that was
    /// never indexed is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), SearchError>;

    /// Runs `query` as a query-string search against all indexed fields and
    /// returns the matching records in index-defined relevance order.
    async fn search(&self, query: &str) -> Result<Vec<T>, SearchError>;
}

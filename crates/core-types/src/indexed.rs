/// Implemented by every record type that is mirrored into the search index.
///
/// `INDEX` names the index the type's documents live in; `id` exposes the
/// store-assigned identity the index is keyed by.
pub trait Indexed {
    const INDEX: &'static str;

    fn id(&self) -> Option<i64>;
}

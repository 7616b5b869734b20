use serde::Deserialize;

pub mod classrooms;
pub mod schools;

/// Query parameters for the list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Accepted for API compatibility but inert: both settings take the
    /// same eager fetch path.
    #[serde(default)]
    pub eagerload: bool,
}

/// Query parameters for the `_search` endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// A malformed identity precondition: an id where none is allowed, or a
    /// missing id where one is required. Carries the structured alert the
    /// client uses to tell the cases apart.
    #[error("Bad request for {entity}: {message}")]
    BadRequest {
        entity: &'static str,
        key: &'static str,
        message: &'static str,
    },
    #[error("Not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Search index error: {0}")]
    Search(#[from] search_index::SearchError),
}

impl AppError {
    pub fn bad_request(entity: &'static str, key: &'static str, message: &'static str) -> Self {
        AppError::BadRequest {
            entity,
            key,
            message,
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Validation failures carry a structured alert (entity name + error key);
/// store and index failures are logged in full but surface only a generic
/// message, never internal details.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest {
                entity,
                key,
                message,
            } => {
                let body = Json(json!({
                    "entityName": entity,
                    "errorKey": key,
                    "message": message,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                let body = Json(json!({ "error": "An internal database error occurred" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            AppError::Search(search_err) => {
                tracing::error!(error = ?search_err, "Search index error.");
                let body = Json(json!({ "error": "The search index is unavailable" }));
                (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
            }
        }
    }
}

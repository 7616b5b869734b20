use super::{ListParams, SearchParams};
use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use core_types::{Classroom, School};
use std::sync::Arc;

const ENTITY_NAME: &str = "school";

/// # POST /api/schools
///
/// Creates a new school. The store assigns the id; the stored record is then
/// mirrored into the search index on a best-effort basis.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(school): Json<School>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(?school, "REST request to create School");
    if school.id.is_some() {
        return Err(AppError::bad_request(
            ENTITY_NAME,
            "idexists",
            "A new school cannot already have an id",
        ));
    }

    let result = state.schools.create(school).await?;
    mirror_save(&state, &result).await;

    // The store always assigns an id on create.
    let location = format!("/api/schools/{}", result.id.unwrap_or_default());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(result),
    ))
}

/// # PUT /api/schools
///
/// Full-record overwrite keyed by the id in the body.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Json(school): Json<School>,
) -> Result<Json<School>, AppError> {
    tracing::debug!(?school, "REST request to update School");
    if school.id.is_none() {
        return Err(AppError::bad_request(ENTITY_NAME, "idnull", "Invalid id"));
    }

    let result = state.schools.update(school).await?;
    mirror_save(&state, &result).await;

    Ok(Json(result))
}

/// # GET /api/schools
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<School>>, AppError> {
    tracing::debug!(eagerload = params.eagerload, "REST request to list Schools");
    // The eagerload flag is inert: both settings take the eager path.
    let schools = state.schools.find_all_eager().await?;
    Ok(Json(schools))
}

/// # GET /api/schools/:id
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<School>, AppError> {
    tracing::debug!(id, "REST request to get School");
    let school = state.schools.find_by_id(id).await?;
    school.map(Json).ok_or(AppError::NotFound)
}

/// # GET /api/schools/:id/classrooms
///
/// The dedicated "all classrooms for school X" query. A school with no
/// classrooms (or no record at all) yields an empty list.
pub async fn list_classrooms(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Classroom>>, AppError> {
    tracing::debug!(id, "REST request to list Classrooms of School");
    let classrooms = state.classrooms.find_for_school(id).await?;
    Ok(Json(classrooms))
}

/// # DELETE /api/schools/:id
///
/// Idempotent: deleting an absent id still answers 204.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(id, "REST request to delete School");
    state.schools.delete_by_id(id).await?;
    if let Err(e) = state.school_index.delete_by_id(id).await {
        tracing::warn!(error = %e, id, "Failed to delete school from the search index");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/_search/schools?query=...
///
/// Served from the search index only. Unlike the write-side mirroring, an
/// unreachable index here propagates to the caller.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<School>>, AppError> {
    tracing::debug!(query = %params.query, "REST request to search Schools");
    let hits = state.school_index.search(&params.query).await?;
    Ok(Json(hits))
}

/// Mirrors a stored record into the search index. The store write has
/// already succeeded, so an index failure is logged and swallowed; the
/// request is still reported successful.
async fn mirror_save(state: &AppState, school: &School) {
    if let Err(e) = state.school_index.save(school).await {
        tracing::warn!(error = %e, id = ?school.id, "Failed to mirror school into the search index");
    }
}

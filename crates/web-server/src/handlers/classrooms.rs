use super::{ListParams, SearchParams};
use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use core_types::Classroom;
use std::sync::Arc;

const ENTITY_NAME: &str = "classroom";

/// # POST /api/classrooms
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(classroom): Json<Classroom>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(?classroom, "REST request to create Classroom");
    if classroom.id.is_some() {
        return Err(AppError::bad_request(
            ENTITY_NAME,
            "idexists",
            "A new classroom cannot already have an id",
        ));
    }

    let result = state.classrooms.create(classroom).await?;
    mirror_save(&state, &result).await;

    let location = format!("/api/classrooms/{}", result.id.unwrap_or_default());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(result),
    ))
}

/// # PUT /api/classrooms
pub async fn update(
    State(state): State<Arc<AppState>>,
    Json(classroom): Json<Classroom>,
) -> Result<Json<Classroom>, AppError> {
    tracing::debug!(?classroom, "REST request to update Classroom");
    if classroom.id.is_none() {
        return Err(AppError::bad_request(ENTITY_NAME, "idnull", "Invalid id"));
    }

    let result = state.classrooms.update(classroom).await?;
    mirror_save(&state, &result).await;

    Ok(Json(result))
}

/// # GET /api/classrooms
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Classroom>>, AppError> {
    tracing::debug!(eagerload = params.eagerload, "REST request to list Classrooms");
    let classrooms = state.classrooms.find_all_eager().await?;
    Ok(Json(classrooms))
}

/// # GET /api/classrooms/:id
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Classroom>, AppError> {
    tracing::debug!(id, "REST request to get Classroom");
    let classroom = state.classrooms.find_by_id(id).await?;
    classroom.map(Json).ok_or(AppError::NotFound)
}

/// # DELETE /api/classrooms/:id
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(id, "REST request to delete Classroom");
    state.classrooms.delete_by_id(id).await?;
    if let Err(e) = state.classroom_index.delete_by_id(id).await {
        tracing::warn!(error = %e, id, "Failed to delete classroom from the search index");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/_search/classrooms?query=...
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Classroom>>, AppError> {
    tracing::debug!(query = %params.query, "REST request to search Classrooms");
    let hits = state.classroom_index.search(&params.query).await?;
    Ok(Json(hits))
}

async fn mirror_save(state: &AppState, classroom: &Classroom) {
    if let Err(e) = state.classroom_index.save(classroom).await {
        tracing::warn!(error = %e, id = ?classroom.id, "Failed to mirror classroom into the search index");
    }
}

use crate::error::DbError;
use async_trait::async_trait;
use core_types::{Classroom, School};

/// The store contract for `School` records.
///
/// This trait is the seam the web layer programs against, allowing the
/// Postgres repository to be swapped out for an in-memory double in tests.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Persists a new school. The record must not carry an id yet; the store
    /// assigns one and returns the stored record including it.
    async fn create(&self, school: School) -> Result<School, DbError>;

    /// Overwrites the record with the matching id. An update against an
    /// absent id silently creates the record (upsert-by-id, no existence
    /// check). The record must carry an id.
    async fn update(&self, school: School) -> Result<School, DbError>;

    /// Fetches one school with its classrooms populated. A missing id is
    /// `Ok(None)`, never an error.
    async fn find_by_id(&self, id: i64) -> Result<Option<School>, DbError>;

    /// Fetches every school with its classrooms populated in the same call.
    async fn find_all_eager(&self) -> Result<Vec<School>, DbError>;

    /// Removes the record if present. Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), DbError>;
}

/// The store contract for `Classroom` records.
#[async_trait]
pub trait ClassroomStore: Send + Sync {
    async fn create(&self, classroom: Classroom) -> Result<Classroom, DbError>;

    async fn update(&self, classroom: Classroom) -> Result<Classroom, DbError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Classroom>, DbError>;

    /// Classrooms have no modeled relations to populate, so the eager fetch
    /// is a plain fetch; the name keeps the two store contracts symmetric.
    async fn find_all_eager(&self) -> Result<Vec<Classroom>, DbError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DbError>;

    /// The dedicated "all classrooms for school X" query, replacing the
    /// auto-populated back-reference of the classic ORM mapping.
    async fn find_for_school(&self, school_id: i64) -> Result<Vec<Classroom>, DbError>;
}

use crate::error::DbError;
use crate::store::{ClassroomStore, SchoolStore};
use async_trait::async_trait;
use core_types::{Classroom, School};
use sqlx::FromRow;
use sqlx::postgres::PgPool;
use std::collections::HashMap;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic
/// and implements the store contracts for both entity types.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

// Row structs mirror the table shapes; the entity structs are assembled from
// them so the eager paths can attach related collections afterwards.
#[derive(FromRow, Debug)]
struct SchoolRow {
    id: i64,
    name: Option<String>,
}

#[derive(FromRow, Debug)]
struct ClassroomRow {
    id: i64,
    name: Option<String>,
    school_id: Option<i64>,
}

impl From<ClassroomRow> for Classroom {
    fn from(row: ClassroomRow) -> Self {
        Classroom {
            id: Some(row.id),
            name: row.name,
            school_id: row.school_id,
        }
    }
}

impl SchoolRow {
    fn into_school(self, classrooms: Vec<Classroom>) -> School {
        School {
            id: Some(self.id),
            name: self.name,
            classrooms,
        }
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the classrooms attached to each of the given schools in one
    /// batched query, grouped by owning school id.
    async fn classrooms_grouped_by_school(
        &self,
        school_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Classroom>>, DbError> {
        let rows = sqlx::query_as::<_, ClassroomRow>(
            "SELECT id, name, school_id FROM classrooms WHERE school_id = ANY($1) ORDER BY id",
        )
        .bind(school_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<Classroom>> = HashMap::new();
        for row in rows {
            if let Some(school_id) = row.school_id {
                grouped.entry(school_id).or_default().push(row.into());
            }
        }
        Ok(grouped)
    }
}

#[async_trait]
impl SchoolStore for DbRepository {
    async fn create(&self, school: School) -> Result<School, DbError> {
        if school.id.is_some() {
            return Err(DbError::IdAlreadyAssigned);
        }
        let row = sqlx::query_as::<_, SchoolRow>(
            "INSERT INTO schools (name) VALUES ($1) RETURNING id, name",
        )
        .bind(school.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into_school(Vec::new()))
    }

    async fn update(&self, school: School) -> Result<School, DbError> {
        let id = school.id.ok_or(DbError::MissingId)?;
        // Full-record overwrite keyed by id. An absent record is silently
        // created rather than rejected; there is no existence check.
        let row = sqlx::query_as::<_, SchoolRow>(
            r#"
            INSERT INTO schools (id, name) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(id)
        .bind(school.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into_school(Vec::new()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<School>, DbError> {
        let row = sqlx::query_as::<_, SchoolRow>("SELECT id, name FROM schools WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let classrooms = self.find_for_school(row.id).await?;
                Ok(Some(row.into_school(classrooms)))
            }
            None => Ok(None),
        }
    }

    async fn find_all_eager(&self) -> Result<Vec<School>, DbError> {
        let rows = sqlx::query_as::<_, SchoolRow>("SELECT id, name FROM schools ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut grouped = self.classrooms_grouped_by_school(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let classrooms = grouped.remove(&row.id).unwrap_or_default();
                row.into_school(classrooms)
            })
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbError> {
        sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ClassroomStore for DbRepository {
    async fn create(&self, classroom: Classroom) -> Result<Classroom, DbError> {
        if classroom.id.is_some() {
            return Err(DbError::IdAlreadyAssigned);
        }
        let row = sqlx::query_as::<_, ClassroomRow>(
            "INSERT INTO classrooms (name, school_id) VALUES ($1, $2) RETURNING id, name, school_id",
        )
        .bind(classroom.name)
        .bind(classroom.school_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, classroom: Classroom) -> Result<Classroom, DbError> {
        let id = classroom.id.ok_or(DbError::MissingId)?;
        let row = sqlx::query_as::<_, ClassroomRow>(
            r#"
            INSERT INTO classrooms (id, name, school_id) VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, school_id = EXCLUDED.school_id
            RETURNING id, name, school_id
            "#,
        )
        .bind(id)
        .bind(classroom.name)
        .bind(classroom.school_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Classroom>, DbError> {
        let row = sqlx::query_as::<_, ClassroomRow>(
            "SELECT id, name, school_id FROM classrooms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Classroom::from))
    }

    async fn find_all_eager(&self) -> Result<Vec<Classroom>, DbError> {
        let rows = sqlx::query_as::<_, ClassroomRow>(
            "SELECT id, name, school_id FROM classrooms ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Classroom::from).collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbError> {
        sqlx::query("DELETE FROM classrooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_for_school(&self, school_id: i64) -> Result<Vec<Classroom>, DbError> {
        let rows = sqlx::query_as::<_, ClassroomRow>(
            "SELECT id, name, school_id FROM classrooms WHERE school_id = $1 ORDER BY id",
        )
        .bind(school_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Classroom::from).collect())
    }
}

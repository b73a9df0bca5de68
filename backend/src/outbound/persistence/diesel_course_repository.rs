//! PostgreSQL-backed `CourseRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseDraft, CourseId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::{CourseChangeset, CourseRow, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel implementation of the course store.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    CourseRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CourseRepositoryError::connection(message),
        DieselFailure::ForeignKey { .. } => {
            CourseRepositoryError::still_referenced("registrations reference this course")
        }
        DieselFailure::UniqueViolation { .. } => {
            CourseRepositoryError::query("unique constraint violated")
        }
        DieselFailure::Query(message) => CourseRepositoryError::query(message),
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CourseRow = diesel::insert_into(courses::table)
            .values(NewCourseRow::from(draft))
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Course::try_from(row).map_err(CourseRepositoryError::query)
    }

    async fn update(&self, course: &Course) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(courses::table.find(course.id().get()))
            .set(CourseChangeset::from(course))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = courses::table
            .find(id.get())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Course::try_from)
            .transpose()
            .map_err(CourseRepositoryError::query)
    }

    async fn exists_by_id(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(courses::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_all(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = courses::table
            .select(CourseRow::as_select())
            .order(courses::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(Course::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(CourseRepositoryError::query)
    }

    async fn delete_by_id(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(courses::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}

//! PostgreSQL-backed `RegistrationRepository`.
//!
//! Both reference columns carry `ON DELETE RESTRICT` foreign keys, so the
//! database rejects dangling registrations even when integrity checks run
//! in best-effort mode.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RegistrationRepository, RegistrationRepositoryError};
use crate::domain::{CourseId, Registration, RegistrationDraft, RegistrationId, StudentId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, constraints};
use super::models::{NewRegistrationRow, RegistrationRow};
use super::pool::{DbPool, PoolError};
use super::schema::registrations;

/// Diesel implementation of the registration store.
#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
}

impl DieselRegistrationRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RegistrationRepositoryError {
    RegistrationRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> RegistrationRepositoryError {
    let failure = classify_diesel_error(error);
    if failure.involves(constraints::REGISTRATION_STUDENT_FK) {
        return RegistrationRepositoryError::missing_reference("student");
    }
    if failure.involves(constraints::REGISTRATION_COURSE_FK) {
        return RegistrationRepositoryError::missing_reference("course");
    }
    match failure {
        DieselFailure::Connection(message) => RegistrationRepositoryError::connection(message),
        DieselFailure::ForeignKey { .. } => {
            RegistrationRepositoryError::missing_reference("student or course")
        }
        DieselFailure::UniqueViolation { .. } => {
            RegistrationRepositoryError::query("unique constraint violated")
        }
        DieselFailure::Query(message) => RegistrationRepositoryError::query(message),
    }
}

fn to_registrations(
    rows: Vec<RegistrationRow>,
) -> Result<Vec<Registration>, RegistrationRepositoryError> {
    rows.into_iter()
        .map(Registration::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(RegistrationRepositoryError::query)
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn insert(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<Registration, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: RegistrationRow = diesel::insert_into(registrations::table)
            .values(NewRegistrationRow::from(draft))
            .returning(RegistrationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Registration::try_from(row).map_err(RegistrationRepositoryError::query)
    }

    async fn find_by_id(
        &self,
        id: RegistrationId,
    ) -> Result<Option<Registration>, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RegistrationRow> = registrations::table
            .find(id.get())
            .select(RegistrationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Registration::try_from)
            .transpose()
            .map_err(RegistrationRepositoryError::query)
    }

    async fn exists_by_id(&self, id: RegistrationId) -> Result<bool, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(registrations::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_all(&self) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RegistrationRow> = registrations::table
            .select(RegistrationRow::as_select())
            .order(registrations::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_registrations(rows)
    }

    async fn find_by_student_id(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RegistrationRow> = registrations::table
            .filter(registrations::student_id.eq(student_id.get()))
            .select(RegistrationRow::as_select())
            .order(registrations::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_registrations(rows)
    }

    async fn find_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RegistrationRow> = registrations::table
            .filter(registrations::course_id.eq(course_id.get()))
            .select(RegistrationRow::as_select())
            .order(registrations::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_registrations(rows)
    }

    async fn exists_by_student_id(
        &self,
        student_id: StudentId,
    ) -> Result<bool, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            registrations::table.filter(registrations::student_id.eq(student_id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn exists_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<bool, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            registrations::table.filter(registrations::course_id.eq(course_id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn delete_by_id(&self, id: RegistrationId) -> Result<bool, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(registrations::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}

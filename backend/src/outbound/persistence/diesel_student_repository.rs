//! PostgreSQL-backed `StudentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{Student, StudentDraft, StudentId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, constraints};
use super::models::{NewStudentRow, StudentChangeset, StudentRow};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel implementation of the student store.
///
/// Email uniqueness is backed by the `students_email_key` index, so a race
/// between two creates still ends in [`StudentRepositoryError::DuplicateEmail`].
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    StudentRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> StudentRepositoryError {
    let failure = classify_diesel_error(error);
    if failure.involves(constraints::STUDENT_EMAIL_UNIQUE) {
        return StudentRepositoryError::duplicate_email(email.unwrap_or_default());
    }
    match failure {
        DieselFailure::Connection(message) => StudentRepositoryError::connection(message),
        DieselFailure::ForeignKey { .. } => {
            StudentRepositoryError::still_referenced("registrations reference this student")
        }
        DieselFailure::UniqueViolation { .. } => {
            StudentRepositoryError::query("unique constraint violated")
        }
        DieselFailure::Query(message) => StudentRepositoryError::query(message),
    }
}

fn to_students(rows: Vec<StudentRow>) -> Result<Vec<Student>, StudentRepositoryError> {
    rows.into_iter()
        .map(Student::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(StudentRepositoryError::query)
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn insert(&self, draft: &StudentDraft) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: StudentRow = diesel::insert_into(students::table)
            .values(NewStudentRow::from(draft))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(draft.email.as_str())))?;
        Student::try_from(row).map_err(StudentRepositoryError::query)
    }

    async fn update(&self, student: &Student) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(students::table.find(student.id().get()))
            .set(StudentChangeset::from(student))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(student.email().as_str())))?;
        Ok(affected > 0)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StudentRow> = students::table
            .find(id.get())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(Student::try_from)
            .transpose()
            .map_err(StudentRepositoryError::query)
    }

    async fn exists_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(students::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))
    }

    async fn find_all(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .select(StudentRow::as_select())
            .order(students::id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        to_students(rows)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .filter(students::email.eq(email))
            .select(StudentRow::as_select())
            .order(students::id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        to_students(rows)
    }

    async fn delete_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(students::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping checks; query behaviour is covered against a live
    //! database only.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_owned()))
    }

    #[rstest]
    fn email_index_violation_names_the_email() {
        let error = map_diesel_error(
            database_error(
                DatabaseErrorKind::UniqueViolation,
                "duplicate key value violates unique constraint \"students_email_key\"",
            ),
            Some("ada@example.com"),
        );
        assert_eq!(error, StudentRepositoryError::duplicate_email("ada@example.com"));
    }

    #[rstest]
    fn restricted_delete_reports_references() {
        let error = map_diesel_error(
            database_error(
                DatabaseErrorKind::ForeignKeyViolation,
                "update or delete on table \"students\" violates foreign key constraint \"registrations_student_id_fkey\"",
            ),
            None,
        );
        assert!(matches!(error, StudentRepositoryError::StillReferenced { .. }));
    }

    #[rstest]
    fn pool_exhaustion_is_a_connection_error() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, StudentRepositoryError::connection("timed out"));
    }
}

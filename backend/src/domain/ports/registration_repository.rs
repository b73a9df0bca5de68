//! Port for registration persistence and reference lookups.

use async_trait::async_trait;

use crate::domain::{CourseId, Registration, RegistrationDraft, RegistrationId, StudentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by registration store adapters.
    pub enum RegistrationRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "registration repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "registration repository query failed: {message}",
        /// The referenced student or course vanished before the insert landed.
        MissingReference { message: String } =>
            "registration references a missing record: {message}",
    }
}

/// Port for reading and writing registration records.
///
/// Registrations are never updated in place; they are inserted and deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a new registration and return it with its assigned id.
    async fn insert(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<Registration, RegistrationRepositoryError>;

    /// Find a registration by id.
    async fn find_by_id(
        &self,
        id: RegistrationId,
    ) -> Result<Option<Registration>, RegistrationRepositoryError>;

    /// Whether a registration with the id exists.
    async fn exists_by_id(&self, id: RegistrationId) -> Result<bool, RegistrationRepositoryError>;

    /// All registrations in store order.
    async fn find_all(&self) -> Result<Vec<Registration>, RegistrationRepositoryError>;

    /// Registrations referencing the student, in store order.
    async fn find_by_student_id(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError>;

    /// Registrations referencing the course, in store order.
    async fn find_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError>;

    /// Whether any registration references the student.
    async fn exists_by_student_id(
        &self,
        student_id: StudentId,
    ) -> Result<bool, RegistrationRepositoryError>;

    /// Whether any registration references the course.
    async fn exists_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<bool, RegistrationRepositoryError>;

    /// Delete a registration. Returns `false` when the id is absent.
    async fn delete_by_id(&self, id: RegistrationId) -> Result<bool, RegistrationRepositoryError>;
}

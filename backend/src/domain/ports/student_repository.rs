//! Port for student persistence and principal lookups.

use async_trait::async_trait;

use crate::domain::{Student, StudentDraft, StudentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student store adapters.
    pub enum StudentRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "student repository query failed: {message}",
        /// Another student already uses the email address.
        DuplicateEmail { email: String } =>
            "email {email} is already registered",
        /// The store refused to delete a student that registrations still reference.
        StillReferenced { message: String } =>
            "student is still referenced: {message}",
    }
}

/// Port for reading and writing student records.
///
/// Identifiers are assigned by the store on insert, increase monotonically
/// and are never reused after deletion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a new student and return it with its assigned id.
    async fn insert(&self, draft: &StudentDraft) -> Result<Student, StudentRepositoryError>;

    /// Overwrite an existing student. Returns `false` when the id is absent.
    async fn update(&self, student: &Student) -> Result<bool, StudentRepositoryError>;

    /// Find a student by id.
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    /// Whether a student with the id exists.
    async fn exists_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError>;

    /// All students in store order.
    async fn find_all(&self) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Every student whose email equals `email` exactly.
    async fn find_by_email(&self, email: &str) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Delete a student. Returns `false` when the id is absent.
    async fn delete_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError>;
}

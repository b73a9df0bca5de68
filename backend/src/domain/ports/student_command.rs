//! Driving port for student mutations.

use async_trait::async_trait;

use crate::domain::{Email, Error, Password, PersonName, Student, StudentId};

/// Validated values for registering a new student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: PersonName,
    pub email: Email,
    pub password: Password,
}

/// Validated values for updating a student.
///
/// `password` is only re-hashed when supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentUpdate {
    pub name: PersonName,
    pub email: Email,
    pub password: Option<Password>,
}

/// Driving port for student write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentCommand: Send + Sync {
    /// Register a student. Fails with `conflict` when the email is taken.
    async fn create_student(&self, student: NewStudent) -> Result<Student, Error>;

    /// Update a student's profile and optionally their password.
    ///
    /// Fails with `not_found` when the id is absent and `conflict` when the
    /// email belongs to another student.
    async fn update_student(&self, id: StudentId, update: StudentUpdate)
    -> Result<Student, Error>;

    /// Delete a student that no registration references.
    ///
    /// Fails with `not_found` when the id is absent and `conflict` while
    /// registrations reference it.
    async fn delete_student(&self, id: StudentId) -> Result<(), Error>;
}

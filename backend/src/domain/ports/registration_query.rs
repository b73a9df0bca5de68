//! Driving port for enrollment reads.

use async_trait::async_trait;

use crate::domain::{CourseId, Error, Registration, RegistrationId, StudentId};

/// Driving port for reading registrations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationQuery: Send + Sync {
    /// Fetch one registration, failing with `not_found` when absent.
    async fn get_registration(&self, id: RegistrationId) -> Result<Registration, Error>;

    /// List every registration in store order.
    async fn list_registrations(&self) -> Result<Vec<Registration>, Error>;

    /// Registrations of one student; `not_found` when the student is absent.
    async fn list_for_student(&self, student_id: StudentId) -> Result<Vec<Registration>, Error>;

    /// Registrations in one course; `not_found` when the course is absent.
    async fn list_for_course(&self, course_id: CourseId) -> Result<Vec<Registration>, Error>;
}

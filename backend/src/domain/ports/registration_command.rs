//! Driving port for enrollment mutations.

use async_trait::async_trait;

use crate::domain::{CourseId, Error, Registration, RegistrationId, StudentId};

/// Driving port for creating and removing registrations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Enroll a student in a course.
    ///
    /// The student is checked before the course; either missing yields
    /// `not_found` and nothing is written.
    async fn create_registration(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Registration, Error>;

    /// Remove a registration. Its student and course are untouched.
    async fn delete_registration(&self, id: RegistrationId) -> Result<(), Error>;
}

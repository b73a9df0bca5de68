//! Driving port for course mutations.

use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId, Error};

/// Driving port for course write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Create a course.
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error>;

    /// Overwrite a course's title and description.
    async fn update_course(&self, id: CourseId, draft: CourseDraft) -> Result<Course, Error>;

    /// Delete a course that no registration references.
    async fn delete_course(&self, id: CourseId) -> Result<(), Error>;
}

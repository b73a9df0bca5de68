//! Port for course persistence.

use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course store adapters.
    pub enum CourseRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course repository query failed: {message}",
        /// The store refused to delete a course that registrations still reference.
        StillReferenced { message: String } =>
            "course is still referenced: {message}",
    }
}

/// Port for reading and writing course records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a new course and return it with its assigned id.
    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError>;

    /// Overwrite an existing course. Returns `false` when the id is absent.
    async fn update(&self, course: &Course) -> Result<bool, CourseRepositoryError>;

    /// Find a course by id.
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Whether a course with the id exists.
    async fn exists_by_id(&self, id: CourseId) -> Result<bool, CourseRepositoryError>;

    /// All courses in store order.
    async fn find_all(&self) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Delete a course. Returns `false` when the id is absent.
    async fn delete_by_id(&self, id: CourseId) -> Result<bool, CourseRepositoryError>;
}

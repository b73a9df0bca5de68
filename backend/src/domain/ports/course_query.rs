//! Driving port for course reads.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, Error};

/// Driving port for course read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// Fetch one course, failing with `not_found` when absent.
    async fn get_course(&self, id: CourseId) -> Result<Course, Error>;

    /// List every course in store order.
    async fn list_courses(&self) -> Result<Vec<Course>, Error>;
}

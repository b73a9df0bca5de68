//! Driving port for student reads.

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentId};

/// Driving port for student read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentQuery: Send + Sync {
    /// Fetch one student, failing with `not_found` when absent.
    async fn get_student(&self, id: StudentId) -> Result<Student, Error>;

    /// List every student in store order.
    async fn list_students(&self) -> Result<Vec<Student>, Error>;
}

//! In-process course store.

use async_trait::async_trait;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseDraft, CourseId};

use super::table::{MemoryTable, TableError};

fn map_table_error(error: TableError) -> CourseRepositoryError {
    CourseRepositoryError::query(error.to_string())
}

/// Course store keeping rows in process memory.
#[derive(Debug)]
pub struct MemoryCourseRepository {
    table: MemoryTable<Course>,
}

impl Default for MemoryCourseRepository {
    fn default() -> Self {
        Self {
            table: MemoryTable::new("courses"),
        }
    }
}

impl MemoryCourseRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for MemoryCourseRepository {
    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let table = self.table.name();
        self.table
            .write(|state| {
                let raw = state.allocate_id(table).map_err(map_table_error)?;
                let id =
                    CourseId::new(raw).map_err(|err| CourseRepositoryError::query(err.to_string()))?;
                let course = Course::from_draft(id, draft.clone());
                state.rows_mut().insert(raw, course.clone());
                Ok(course)
            })
            .map_err(map_table_error)?
    }

    async fn update(&self, course: &Course) -> Result<bool, CourseRepositoryError> {
        self.table
            .write(|state| match state.rows_mut().get_mut(&course.id().get()) {
                Some(row) => {
                    *row = course.clone();
                    true
                }
                None => false,
            })
            .map_err(map_table_error)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        self.table
            .read(|state| state.rows().get(&id.get()).cloned())
            .map_err(map_table_error)
    }

    async fn exists_by_id(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        self.table
            .read(|state| state.rows().contains_key(&id.get()))
            .map_err(map_table_error)
    }

    async fn find_all(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        self.table
            .read(|state| state.rows().values().cloned().collect())
            .map_err(map_table_error)
    }

    async fn delete_by_id(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        self.table
            .write(|state| state.rows_mut().remove(&id.get()).is_some())
            .map_err(map_table_error)
    }
}

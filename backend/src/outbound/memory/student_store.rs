//! In-process student store.

use async_trait::async_trait;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{Student, StudentDraft, StudentId};

use super::table::{MemoryTable, TableError};

fn map_table_error(error: TableError) -> StudentRepositoryError {
    StudentRepositoryError::query(error.to_string())
}

/// Student store keeping rows in process memory.
///
/// Email uniqueness is checked under the same write lock as the insert or
/// update, so concurrent writers cannot both claim an address.
#[derive(Debug)]
pub struct MemoryStudentRepository {
    table: MemoryTable<Student>,
}

impl Default for MemoryStudentRepository {
    fn default() -> Self {
        Self {
            table: MemoryTable::new("students"),
        }
    }
}

impl MemoryStudentRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    async fn insert(&self, draft: &StudentDraft) -> Result<Student, StudentRepositoryError> {
        let table = self.table.name();
        self.table
            .write(|state| {
                if state
                    .rows()
                    .values()
                    .any(|existing| existing.email() == &draft.email)
                {
                    return Err(StudentRepositoryError::duplicate_email(draft.email.as_str()));
                }
                let raw = state.allocate_id(table).map_err(map_table_error)?;
                let id = StudentId::new(raw)
                    .map_err(|err| StudentRepositoryError::query(err.to_string()))?;
                let student = Student::from_draft(id, draft.clone());
                state.rows_mut().insert(raw, student.clone());
                Ok(student)
            })
            .map_err(map_table_error)?
    }

    async fn update(&self, student: &Student) -> Result<bool, StudentRepositoryError> {
        self.table
            .write(|state| {
                if state
                    .rows()
                    .values()
                    .any(|other| other.id() != student.id() && other.email() == student.email())
                {
                    return Err(StudentRepositoryError::duplicate_email(
                        student.email().as_str(),
                    ));
                }
                match state.rows_mut().get_mut(&student.id().get()) {
                    Some(row) => {
                        *row = student.clone();
                        Ok(true)
                    }
                    None => Ok(false),
                }
            })
            .map_err(map_table_error)?
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        self.table
            .read(|state| state.rows().get(&id.get()).cloned())
            .map_err(map_table_error)
    }

    async fn exists_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        self.table
            .read(|state| state.rows().contains_key(&id.get()))
            .map_err(map_table_error)
    }

    async fn find_all(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        self.table
            .read(|state| state.rows().values().cloned().collect())
            .map_err(map_table_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Student>, StudentRepositoryError> {
        self.table
            .read(|state| {
                state
                    .rows()
                    .values()
                    .filter(|student| student.email().as_str() == email)
                    .cloned()
                    .collect()
            })
            .map_err(map_table_error)
    }

    async fn delete_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        self.table
            .write(|state| state.rows_mut().remove(&id.get()).is_some())
            .map_err(map_table_error)
    }
}

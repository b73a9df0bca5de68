//! In-process registration store.
//!
//! The store keeps no foreign keys; reference checks belong to the
//! enrollment coordinator and the lifecycle guard.

use async_trait::async_trait;

use crate::domain::ports::{RegistrationRepository, RegistrationRepositoryError};
use crate::domain::{CourseId, Registration, RegistrationDraft, RegistrationId, StudentId};

use super::table::{MemoryTable, TableError};

fn map_table_error(error: TableError) -> RegistrationRepositoryError {
    RegistrationRepositoryError::query(error.to_string())
}

/// Registration store keeping rows in process memory.
#[derive(Debug)]
pub struct MemoryRegistrationRepository {
    table: MemoryTable<Registration>,
}

impl Default for MemoryRegistrationRepository {
    fn default() -> Self {
        Self {
            table: MemoryTable::new("registrations"),
        }
    }
}

impl MemoryRegistrationRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_where(
        &self,
        predicate: impl Fn(&Registration) -> bool,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        self.table
            .read(|state| {
                state
                    .rows()
                    .values()
                    .filter(|registration| predicate(registration))
                    .cloned()
                    .collect()
            })
            .map_err(map_table_error)
    }

    fn any_where(
        &self,
        predicate: impl Fn(&Registration) -> bool,
    ) -> Result<bool, RegistrationRepositoryError> {
        self.table
            .read(|state| state.rows().values().any(|registration| predicate(registration)))
            .map_err(map_table_error)
    }
}

#[async_trait]
impl RegistrationRepository for MemoryRegistrationRepository {
    async fn insert(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<Registration, RegistrationRepositoryError> {
        let table = self.table.name();
        self.table
            .write(|state| {
                let raw = state.allocate_id(table).map_err(map_table_error)?;
                let id = RegistrationId::new(raw)
                    .map_err(|err| RegistrationRepositoryError::query(err.to_string()))?;
                let registration = Registration::from_draft(id, draft.clone());
                state.rows_mut().insert(raw, registration.clone());
                Ok(registration)
            })
            .map_err(map_table_error)?
    }

    async fn find_by_id(
        &self,
        id: RegistrationId,
    ) -> Result<Option<Registration>, RegistrationRepositoryError> {
        self.table
            .read(|state| state.rows().get(&id.get()).cloned())
            .map_err(map_table_error)
    }

    async fn exists_by_id(&self, id: RegistrationId) -> Result<bool, RegistrationRepositoryError> {
        self.table
            .read(|state| state.rows().contains_key(&id.get()))
            .map_err(map_table_error)
    }

    async fn find_all(&self) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        self.collect_where(|_| true)
    }

    async fn find_by_student_id(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        self.collect_where(|registration| registration.student_id() == student_id)
    }

    async fn find_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Registration>, RegistrationRepositoryError> {
        self.collect_where(|registration| registration.course_id() == course_id)
    }

    async fn exists_by_student_id(
        &self,
        student_id: StudentId,
    ) -> Result<bool, RegistrationRepositoryError> {
        self.any_where(|registration| registration.student_id() == student_id)
    }

    async fn exists_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<bool, RegistrationRepositoryError> {
        self.any_where(|registration| registration.course_id() == course_id)
    }

    async fn delete_by_id(&self, id: RegistrationId) -> Result<bool, RegistrationRepositoryError> {
        self.table
            .write(|state| state.rows_mut().remove(&id.get()).is_some())
            .map_err(map_table_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{CourseTitle, Email, PersonName};

    fn draft(student: i32, course: i32) -> RegistrationDraft {
        RegistrationDraft {
            student_id: StudentId::new(student).expect("valid id"),
            course_id: CourseId::new(course).expect("valid id"),
            student_name: PersonName::new("Ada").expect("valid name"),
            student_email: Email::new("ada@example.com").expect("valid email"),
            course_title: CourseTitle::new("Logic").expect("valid title"),
        }
    }

    #[tokio::test]
    async fn reference_queries_filter_by_parent() {
        let store = MemoryRegistrationRepository::new();
        store.insert(&draft(1, 1)).await.expect("insert");
        store.insert(&draft(1, 2)).await.expect("insert");
        store.insert(&draft(2, 2)).await.expect("insert");

        let student_one = StudentId::new(1).expect("valid id");
        let course_two = CourseId::new(2).expect("valid id");
        assert_eq!(store.find_by_student_id(student_one).await.expect("list").len(), 2);
        assert_eq!(store.find_by_course_id(course_two).await.expect("list").len(), 2);
        assert!(store.exists_by_course_id(course_two).await.expect("exists"));
        assert!(
            !store
                .exists_by_student_id(StudentId::new(3).expect("valid id"))
                .await
                .expect("exists")
        );
    }

    #[tokio::test]
    async fn delete_reports_absence() {
        let store = MemoryRegistrationRepository::new();
        let created = store.insert(&draft(1, 1)).await.expect("insert");
        assert!(store.delete_by_id(created.id()).await.expect("delete"));
        assert!(!store.delete_by_id(created.id()).await.expect("delete"));
        assert!(store.find_all().await.expect("list").is_empty());
    }
}

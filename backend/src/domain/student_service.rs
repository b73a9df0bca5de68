//! Student domain service.
//!
//! Implements the student driving ports: registration of new students with
//! hashed credentials, profile updates, lookups and guarded deletion. Email
//! addresses double as login principals and are kept unique.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::lifecycle_guard::LifecycleGuard;
use super::ports::{
    NewStudent, PasswordHasher, RegistrationRepository, StudentCommand, StudentQuery,
    StudentRepository, StudentUpdate,
};
use super::repository_errors::map_student_error;
use super::{Email, Error, Password, PasswordHash, Student, StudentDraft, StudentId};

/// Student service implementing the command and query driving ports.
pub struct StudentService<S, R> {
    students: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
    guard: LifecycleGuard<R>,
}

impl<S, R> StudentService<S, R> {
    /// Create the service from its store, hasher and delete guard.
    pub fn new(students: Arc<S>, hasher: Arc<dyn PasswordHasher>, guard: LifecycleGuard<R>) -> Self {
        Self {
            students,
            hasher,
            guard,
        }
    }
}

impl<S, R> StudentService<S, R>
where
    S: StudentRepository,
{
    fn hash(&self, password: &Password) -> Result<PasswordHash, Error> {
        self.hasher
            .hash(password)
            .map_err(|err| Error::internal(err.to_string()))
    }

    /// Fail with `conflict` when another student already uses `email`.
    async fn ensure_email_free(&self, email: &Email, owner: Option<StudentId>) -> Result<(), Error> {
        let holders = self
            .students
            .find_by_email(email.as_str())
            .await
            .map_err(map_student_error)?;
        if holders.iter().any(|holder| Some(holder.id()) != owner) {
            return Err(Error::conflict(format!("email {email} is already registered")));
        }
        Ok(())
    }
}

#[async_trait]
impl<S, R> StudentCommand for StudentService<S, R>
where
    S: StudentRepository,
    R: RegistrationRepository,
{
    async fn create_student(&self, student: NewStudent) -> Result<Student, Error> {
        let NewStudent {
            name,
            email,
            password,
        } = student;
        self.ensure_email_free(&email, None).await?;

        let draft = StudentDraft {
            name,
            email,
            password_hash: self.hash(&password)?,
        };
        let created = self
            .students
            .insert(&draft)
            .await
            .map_err(map_student_error)?;

        info!(student_id = %created.id(), "student created");
        Ok(created)
    }

    async fn update_student(
        &self,
        id: StudentId,
        update: StudentUpdate,
    ) -> Result<Student, Error> {
        let StudentUpdate {
            name,
            email,
            password,
        } = update;
        let existing = self
            .students
            .find_by_id(id)
            .await
            .map_err(map_student_error)?
            .ok_or_else(|| Error::not_found(format!("student {id} not found")))?;
        self.ensure_email_free(&email, Some(id)).await?;

        let mut updated = existing.with_profile(name, email);
        if let Some(password) = password {
            updated = updated.with_password_hash(self.hash(&password)?);
        }

        if !self
            .students
            .update(&updated)
            .await
            .map_err(map_student_error)?
        {
            return Err(Error::not_found(format!("student {id} not found")));
        }

        info!(student_id = %id, "student updated");
        Ok(updated)
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), Error> {
        self.guard.delete_student(self.students.as_ref(), id).await
    }
}

#[async_trait]
impl<S, R> StudentQuery for StudentService<S, R>
where
    S: StudentRepository,
    R: RegistrationRepository,
{
    async fn get_student(&self, id: StudentId) -> Result<Student, Error> {
        self.students
            .find_by_id(id)
            .await
            .map_err(map_student_error)?
            .ok_or_else(|| Error::not_found(format!("student {id} not found")))
    }

    async fn list_students(&self) -> Result<Vec<Student>, Error> {
        self.students.find_all().await.map_err(map_student_error)
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;

//! Guarded deletion of students and courses.
//!
//! A student or course may only be deleted while no registration references
//! it. The check and the delete are two store calls; in best-effort mode a
//! registration created between them is not noticed. The serialized mode
//! routes guarded deletes and registration creation through one shared
//! [`IntegrityGate`] so the two never interleave.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;

use super::ports::{CourseRepository, RegistrationRepository, StudentRepository};
use super::repository_errors::{map_course_error, map_registration_error, map_student_error};
use super::{CourseId, Error, StudentId};

/// Shared gate serialising integrity-sensitive operations.
///
/// Cloning shares the underlying lock.
#[derive(Debug, Clone, Default)]
pub struct IntegrityGate(Option<Arc<Mutex<()>>>);

impl IntegrityGate {
    /// Gate that never blocks; checks and mutations may interleave.
    #[must_use]
    pub fn best_effort() -> Self {
        Self(None)
    }

    /// Gate that admits one guarded operation at a time.
    #[must_use]
    pub fn serialized() -> Self {
        Self(Some(Arc::new(Mutex::new(()))))
    }

    /// Pick the gate for the configured mode.
    #[must_use]
    pub fn for_mode(serialized: bool) -> Self {
        if serialized {
            Self::serialized()
        } else {
            Self::best_effort()
        }
    }

    /// Whether operations are serialized.
    #[must_use]
    pub fn is_serialized(&self) -> bool {
        self.0.is_some()
    }

    /// Wait for exclusive access. The returned permit releases on drop.
    pub async fn enter(&self) -> Option<OwnedMutexGuard<()>> {
        match &self.0 {
            Some(lock) => Some(Arc::clone(lock).lock_owned().await),
            None => None,
        }
    }
}

/// Delete guard consulting the registration store before removing a parent.
pub struct LifecycleGuard<R> {
    registrations: Arc<R>,
    gate: IntegrityGate,
}

impl<R> Clone for LifecycleGuard<R> {
    fn clone(&self) -> Self {
        Self {
            registrations: Arc::clone(&self.registrations),
            gate: self.gate.clone(),
        }
    }
}

impl<R> LifecycleGuard<R>
where
    R: RegistrationRepository,
{
    /// Create a guard over the registration store.
    pub fn new(registrations: Arc<R>, gate: IntegrityGate) -> Self {
        Self {
            registrations,
            gate,
        }
    }

    /// Delete a student unless it is absent (`not_found`) or still
    /// referenced by a registration (`conflict`).
    pub async fn delete_student<S>(&self, students: &S, id: StudentId) -> Result<(), Error>
    where
        S: StudentRepository + ?Sized,
    {
        let _permit = self.gate.enter().await;

        if !students.exists_by_id(id).await.map_err(map_student_error)? {
            return Err(Error::not_found(format!("student {id} not found")));
        }
        if self
            .registrations
            .exists_by_student_id(id)
            .await
            .map_err(map_registration_error)?
        {
            return Err(Error::conflict(format!(
                "student {id} still has registrations"
            )));
        }
        if !students.delete_by_id(id).await.map_err(map_student_error)? {
            return Err(Error::not_found(format!("student {id} not found")));
        }

        info!(student_id = %id, "student deleted");
        Ok(())
    }

    /// Delete a course unless it is absent (`not_found`) or still referenced
    /// by a registration (`conflict`).
    pub async fn delete_course<C>(&self, courses: &C, id: CourseId) -> Result<(), Error>
    where
        C: CourseRepository + ?Sized,
    {
        let _permit = self.gate.enter().await;

        if !courses.exists_by_id(id).await.map_err(map_course_error)? {
            return Err(Error::not_found(format!("course {id} not found")));
        }
        if self
            .registrations
            .exists_by_course_id(id)
            .await
            .map_err(map_registration_error)?
        {
            return Err(Error::conflict(format!("course {id} still has registrations")));
        }
        if !courses.delete_by_id(id).await.map_err(map_course_error)? {
            return Err(Error::not_found(format!("course {id} not found")));
        }

        info!(course_id = %id, "course deleted");
        Ok(())
    }
}

//! Enrollment coordinator.
//!
//! Implements the registration driving ports. Creating a registration
//! requires a live student and a live course, checked in that order, and
//! copies the student name, student email and course title into the new
//! record.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::lifecycle_guard::IntegrityGate;
use super::ports::{
    CourseRepository, RegistrationCommand, RegistrationQuery, RegistrationRepository,
    StudentRepository,
};
use super::repository_errors::{map_course_error, map_registration_error, map_student_error};
use super::{CourseId, Error, Registration, RegistrationDraft, RegistrationId, StudentId};

/// Registration service implementing the command and query driving ports.
pub struct EnrollmentService<S, C, R> {
    students: Arc<S>,
    courses: Arc<C>,
    registrations: Arc<R>,
    gate: IntegrityGate,
}

impl<S, C, R> EnrollmentService<S, C, R> {
    /// Create the coordinator over the three stores.
    ///
    /// `gate` must be shared with the [`LifecycleGuard`](super::LifecycleGuard)
    /// for serialized mode to take effect.
    pub fn new(
        students: Arc<S>,
        courses: Arc<C>,
        registrations: Arc<R>,
        gate: IntegrityGate,
    ) -> Self {
        Self {
            students,
            courses,
            registrations,
            gate,
        }
    }
}

impl<S, C, R> EnrollmentService<S, C, R>
where
    S: StudentRepository,
    C: CourseRepository,
    R: RegistrationRepository,
{
    async fn require_student(&self, id: StudentId) -> Result<(), Error> {
        if self
            .students
            .exists_by_id(id)
            .await
            .map_err(map_student_error)?
        {
            Ok(())
        } else {
            Err(Error::not_found(format!("student {id} not found")))
        }
    }

    async fn require_course(&self, id: CourseId) -> Result<(), Error> {
        if self
            .courses
            .exists_by_id(id)
            .await
            .map_err(map_course_error)?
        {
            Ok(())
        } else {
            Err(Error::not_found(format!("course {id} not found")))
        }
    }
}

#[async_trait]
impl<S, C, R> RegistrationCommand for EnrollmentService<S, C, R>
where
    S: StudentRepository,
    C: CourseRepository,
    R: RegistrationRepository,
{
    async fn create_registration(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Registration, Error> {
        let _permit = self.gate.enter().await;

        let student = self
            .students
            .find_by_id(student_id)
            .await
            .map_err(map_student_error)?
            .ok_or_else(|| Error::not_found(format!("student {student_id} not found")))?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found(format!("course {course_id} not found")))?;

        let registration = self
            .registrations
            .insert(&RegistrationDraft::snapshot(&student, &course))
            .await
            .map_err(map_registration_error)?;

        info!(
            registration_id = %registration.id(),
            %student_id,
            %course_id,
            "registration created"
        );
        Ok(registration)
    }

    async fn delete_registration(&self, id: RegistrationId) -> Result<(), Error> {
        let missing = || Error::not_found(format!("registration {id} not found"));
        if !self
            .registrations
            .exists_by_id(id)
            .await
            .map_err(map_registration_error)?
        {
            return Err(missing());
        }
        // A concurrent delete may still win between the check and here.
        if !self
            .registrations
            .delete_by_id(id)
            .await
            .map_err(map_registration_error)?
        {
            return Err(missing());
        }

        info!(registration_id = %id, "registration deleted");
        Ok(())
    }
}

#[async_trait]
impl<S, C, R> RegistrationQuery for EnrollmentService<S, C, R>
where
    S: StudentRepository,
    C: CourseRepository,
    R: RegistrationRepository,
{
    async fn get_registration(&self, id: RegistrationId) -> Result<Registration, Error> {
        self.registrations
            .find_by_id(id)
            .await
            .map_err(map_registration_error)?
            .ok_or_else(|| Error::not_found(format!("registration {id} not found")))
    }

    async fn list_registrations(&self) -> Result<Vec<Registration>, Error> {
        self.registrations
            .find_all()
            .await
            .map_err(map_registration_error)
    }

    async fn list_for_student(&self, student_id: StudentId) -> Result<Vec<Registration>, Error> {
        self.require_student(student_id).await?;
        self.registrations
            .find_by_student_id(student_id)
            .await
            .map_err(map_registration_error)
    }

    async fn list_for_course(&self, course_id: CourseId) -> Result<Vec<Registration>, Error> {
        self.require_course(course_id).await?;
        self.registrations
            .find_by_course_id(course_id)
            .await
            .map_err(map_registration_error)
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;

//! Course domain service implementing the course driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::lifecycle_guard::LifecycleGuard;
use super::ports::{
    CourseCommand, CourseQuery, CourseRepository, RegistrationRepository,
};
use super::repository_errors::map_course_error;
use super::{Course, CourseDraft, CourseId, Error};

/// Course service implementing the command and query driving ports.
pub struct CourseService<C, R> {
    courses: Arc<C>,
    guard: LifecycleGuard<R>,
}

impl<C, R> CourseService<C, R> {
    /// Create the service from its store and delete guard.
    pub fn new(courses: Arc<C>, guard: LifecycleGuard<R>) -> Self {
        Self { courses, guard }
    }
}

#[async_trait]
impl<C, R> CourseCommand for CourseService<C, R>
where
    C: CourseRepository,
    R: RegistrationRepository,
{
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error> {
        let created = self
            .courses
            .insert(&draft)
            .await
            .map_err(map_course_error)?;

        info!(course_id = %created.id(), "course created");
        Ok(created)
    }

    async fn update_course(&self, id: CourseId, draft: CourseDraft) -> Result<Course, Error> {
        let updated = Course::from_draft(id, draft);
        if !self
            .courses
            .update(&updated)
            .await
            .map_err(map_course_error)?
        {
            return Err(Error::not_found(format!("course {id} not found")));
        }

        info!(course_id = %id, "course updated");
        Ok(updated)
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), Error> {
        self.guard.delete_course(self.courses.as_ref(), id).await
    }
}

#[async_trait]
impl<C, R> CourseQuery for CourseService<C, R>
where
    C: CourseRepository,
    R: RegistrationRepository,
{
    async fn get_course(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found(format!("course {id} not found")))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        self.courses.find_all().await.map_err(map_course_error)
    }
}

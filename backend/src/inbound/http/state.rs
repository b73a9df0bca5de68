//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against mocks without any store behind them.

use std::sync::Arc;

use crate::domain::ports::{
    CourseCommand, CourseQuery, CourseRepository, LoginService, PasswordHasher,
    RegistrationCommand, RegistrationQuery, RegistrationRepository, StudentCommand, StudentQuery,
    StudentRepository,
};
use crate::domain::{
    CourseService, CredentialLoginService, EnrollmentService, IntegrityGate, LifecycleGuard,
    StudentService,
};
use crate::outbound::memory::{
    MemoryCourseRepository, MemoryRegistrationRepository, MemoryStudentRepository,
};

/// Parameter object bundling the three store adapters.
pub struct StorePorts<S, C, R> {
    pub students: Arc<S>,
    pub courses: Arc<C>,
    pub registrations: Arc<R>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub students: Arc<dyn StudentCommand>,
    pub students_query: Arc<dyn StudentQuery>,
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
    pub registrations: Arc<dyn RegistrationCommand>,
    pub registrations_query: Arc<dyn RegistrationQuery>,
}

impl HttpState {
    /// Wire the domain services over a set of stores.
    ///
    /// The lifecycle guard and the enrollment service share `gate`, so a
    /// serialized gate orders guarded deletes against registration creation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use registrar::domain::IntegrityGate;
    /// use registrar::inbound::http::state::{HttpState, StorePorts};
    /// use registrar::outbound::crypto::Argon2PasswordHasher;
    /// use registrar::outbound::memory::{
    ///     MemoryCourseRepository, MemoryRegistrationRepository, MemoryStudentRepository,
    /// };
    ///
    /// let state = HttpState::from_stores(
    ///     StorePorts {
    ///         students: Arc::new(MemoryStudentRepository::new()),
    ///         courses: Arc::new(MemoryCourseRepository::new()),
    ///         registrations: Arc::new(MemoryRegistrationRepository::new()),
    ///     },
    ///     Arc::new(Argon2PasswordHasher::default()),
    ///     IntegrityGate::best_effort(),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn from_stores<S, C, R>(
        stores: StorePorts<S, C, R>,
        hasher: Arc<dyn PasswordHasher>,
        gate: IntegrityGate,
    ) -> Self
    where
        S: StudentRepository + 'static,
        C: CourseRepository + 'static,
        R: RegistrationRepository + 'static,
    {
        let StorePorts {
            students,
            courses,
            registrations,
        } = stores;
        let guard = LifecycleGuard::new(Arc::clone(&registrations), gate.clone());
        let student_service = Arc::new(StudentService::new(
            Arc::clone(&students),
            Arc::clone(&hasher),
            guard.clone(),
        ));
        let course_service = Arc::new(CourseService::new(Arc::clone(&courses), guard));
        let enrollment = Arc::new(EnrollmentService::new(
            Arc::clone(&students),
            courses,
            registrations,
            gate,
        ));
        let login = Arc::new(CredentialLoginService::new(students, hasher));

        Self {
            login,
            students: student_service.clone(),
            students_query: student_service,
            courses: course_service.clone(),
            courses_query: course_service,
            registrations: enrollment.clone(),
            registrations_query: enrollment,
        }
    }

    /// Wire the domain services over fresh in-process stores.
    pub fn in_memory(hasher: Arc<dyn PasswordHasher>, gate: IntegrityGate) -> Self {
        Self::from_stores(
            StorePorts {
                students: Arc::new(MemoryStudentRepository::new()),
                courses: Arc::new(MemoryCourseRepository::new()),
                registrations: Arc::new(MemoryRegistrationRepository::new()),
            },
            hasher,
            gate,
        )
    }
}

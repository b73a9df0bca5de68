//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed student, course and registration entities,
//! the ports through which adapters reach them, and the services enforcing
//! the cross-entity rules:
//! - a registration must reference a live student and course;
//! - a referenced student or course cannot be deleted;
//! - a student's email is their login principal.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Student, Course, Registration plus their validated value types.
//! - StudentService, CourseService, EnrollmentService, CredentialLoginService:
//!   implementations of the driving ports in [`ports`].
//! - LifecycleGuard / IntegrityGate: guarded deletes and serialized mode.

pub mod auth;
pub mod course;
pub mod course_service;
pub mod enrollment_service;
pub mod error;
pub mod identifier;
pub mod identity_service;
pub mod lifecycle_guard;
pub mod ports;
pub mod registration;
mod repository_errors;
pub mod student;
pub mod student_service;
pub mod trace_id;

pub use self::auth::{
    Credentials, CredentialsValidationError, PASSWORD_MAX, Password, Principal,
};
pub use self::course::{
    Course, CourseDescription, CourseDraft, CourseTitle, CourseValidationError, DESCRIPTION_MAX,
};
pub use self::course_service::CourseService;
pub use self::enrollment_service::EnrollmentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::identifier::{CourseId, IdentifierError, RegistrationId, StudentId};
pub use self::identity_service::{AuthenticationFailure, CredentialLoginService, IdentityResolver};
pub use self::lifecycle_guard::{IntegrityGate, LifecycleGuard};
pub use self::registration::{Registration, RegistrationDraft};
pub use self::student::{
    EMAIL_MAX, Email, NAME_MAX, PasswordHash, PersonName, Student, StudentDraft,
    StudentValidationError,
};
pub use self::student_service::StudentService;
pub use self::trace_id::TraceId;

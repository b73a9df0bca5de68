//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`, [`LoginService`])
//! are implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod course_command;
mod course_query;
mod course_repository;
mod login_service;
mod password_hasher;
mod registration_command;
mod registration_query;
mod registration_repository;
mod student_command;
mod student_query;
mod student_repository;

pub use course_command::CourseCommand;
#[cfg(test)]
pub use course_command::MockCourseCommand;
pub use course_query::CourseQuery;
#[cfg(test)]
pub use course_query::MockCourseQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::RegistrationCommand;
#[cfg(test)]
pub use registration_query::MockRegistrationQuery;
pub use registration_query::RegistrationQuery;
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
pub use registration_repository::{RegistrationRepository, RegistrationRepositoryError};
#[cfg(test)]
pub use student_command::MockStudentCommand;
pub use student_command::{NewStudent, StudentCommand, StudentUpdate};
#[cfg(test)]
pub use student_query::MockStudentQuery;
pub use student_query::StudentQuery;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentRepositoryError};

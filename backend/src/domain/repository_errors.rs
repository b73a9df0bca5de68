//! Translation of store port errors into domain errors.
//!
//! Connection failures surface as `service_unavailable`, query failures as
//! redacted `internal_error`, and integrity refusals raised by the store
//! itself as the same `conflict`/`not_found` the services would have raised.

use tracing::{debug, warn};

use super::Error;
use super::ports::{CourseRepositoryError, RegistrationRepositoryError, StudentRepositoryError};

pub(crate) fn map_student_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            warn!(%message, "student repository unavailable");
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            warn!(%message, "student repository query failed");
            Error::internal(format!("student repository error: {message}"))
        }
        StudentRepositoryError::DuplicateEmail { email } => {
            debug!(%email, "student store rejected duplicate email");
            Error::conflict(format!("email {email} is already registered"))
        }
        StudentRepositoryError::StillReferenced { message } => {
            debug!(%message, "student store refused delete");
            Error::conflict("student still has registrations")
        }
    }
}

pub(crate) fn map_course_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            warn!(%message, "course repository unavailable");
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            warn!(%message, "course repository query failed");
            Error::internal(format!("course repository error: {message}"))
        }
        CourseRepositoryError::StillReferenced { message } => {
            debug!(%message, "course store refused delete");
            Error::conflict("course still has registrations")
        }
    }
}

pub(crate) fn map_registration_error(error: RegistrationRepositoryError) -> Error {
    match error {
        RegistrationRepositoryError::Connection { message } => {
            warn!(%message, "registration repository unavailable");
            Error::service_unavailable(format!("registration repository unavailable: {message}"))
        }
        RegistrationRepositoryError::Query { message } => {
            warn!(%message, "registration repository query failed");
            Error::internal(format!("registration repository error: {message}"))
        }
        RegistrationRepositoryError::MissingReference { message } => {
            debug!(%message, "registration store rejected dangling reference");
            Error::not_found("student or course no longer exists")
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(StudentRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(StudentRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(StudentRepositoryError::duplicate_email("a@b"), ErrorCode::Conflict)]
    #[case(StudentRepositoryError::still_referenced("fk"), ErrorCode::Conflict)]
    fn student_errors_map_to_codes(
        #[case] error: StudentRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_student_error(error).code(), expected);
    }

    #[rstest]
    #[case(CourseRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(CourseRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(CourseRepositoryError::still_referenced("fk"), ErrorCode::Conflict)]
    fn course_errors_map_to_codes(#[case] error: CourseRepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(map_course_error(error).code(), expected);
    }

    #[rstest]
    #[case(RegistrationRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(RegistrationRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RegistrationRepositoryError::missing_reference("fk"), ErrorCode::NotFound)]
    fn registration_errors_map_to_codes(
        #[case] error: RegistrationRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_registration_error(error).code(), expected);
    }
}

//! Shared Diesel error classification for the repository adapters.
//!
//! Each repository owns its port error type, so the helpers here reduce a
//! Diesel failure to a [`DieselFailure`] and leave the final mapping to the
//! caller.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

/// Named constraints declared by the migrations.
pub(crate) mod constraints {
    /// Unique index on `students.email`.
    pub const STUDENT_EMAIL_UNIQUE: &str = "students_email_key";
    /// `registrations.student_id` foreign key.
    pub const REGISTRATION_STUDENT_FK: &str = "registrations_student_id_fkey";
    /// `registrations.course_id` foreign key.
    pub const REGISTRATION_COURSE_FK: &str = "registrations_course_id_fkey";
}

/// Storage failure reduced to the cases repositories distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(String),
    /// A foreign key rejected the statement.
    ForeignKey { constraint: Option<String> },
    /// A unique constraint rejected the statement.
    UniqueViolation { constraint: Option<String> },
    /// Anything else.
    Query(String),
}

impl DieselFailure {
    /// Whether the failure came from the named constraint.
    pub(crate) fn involves(&self, constraint_name: &str) -> bool {
        match self {
            Self::ForeignKey { constraint } | Self::UniqueViolation { constraint } => constraint
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(constraint_name)),
            _ => false,
        }
    }
}

/// Classify a Diesel error and log its detail at debug level.
pub(crate) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DieselFailure::ForeignKey {
                constraint: constraint_of(info.constraint_name(), info.message()),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: constraint_of(info.constraint_name(), info.message()),
            }
        }
        DieselError::NotFound => DieselFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => {
            DieselFailure::Query("database query error".to_owned())
        }
        _ => DieselFailure::Query("database error".to_owned()),
    }
}

/// Prefer the reported constraint name, else pull the quoted name out of
/// PostgreSQL's `violates ... constraint "name"` message.
fn constraint_of(reported: Option<&str>, message: &str) -> Option<String> {
    if let Some(name) = reported {
        return Some(name.to_owned());
    }
    let (_, tail) = message.split_once("constraint \"")?;
    let (name, _) = tail.split_once('"')?;
    if name.is_empty() {
        warn!(message, "constraint violation without a constraint name");
        return None;
    }
    Some(name.to_owned())
}

#[cfg(test)]
mod tests {
    //! Classification checks using message-only database errors.
    use super::*;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_owned()))
    }

    #[rstest]
    fn closed_connections_are_connection_failures() {
        let failure =
            classify_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, "gone"));
        assert!(matches!(failure, DieselFailure::Connection(_)));
    }

    #[rstest]
    #[case(
        "insert or update on table \"registrations\" violates foreign key constraint \"registrations_student_id_fkey\"",
        constraints::REGISTRATION_STUDENT_FK
    )]
    #[case(
        "update or delete on table \"courses\" violates foreign key constraint \"registrations_course_id_fkey\" on table \"registrations\"",
        constraints::REGISTRATION_COURSE_FK
    )]
    fn foreign_keys_are_named_from_the_message(#[case] message: &str, #[case] expected: &str) {
        let failure = classify_diesel_error(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            message,
        ));
        assert!(failure.involves(expected));
    }

    #[rstest]
    fn unique_email_violation_is_recognised() {
        let failure = classify_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"students_email_key\"",
        ));
        assert!(failure.involves(constraints::STUDENT_EMAIL_UNIQUE));
        assert!(!failure.involves(constraints::REGISTRATION_STUDENT_FK));
    }

    #[rstest]
    fn unnamed_violations_match_nothing() {
        let failure = classify_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key",
        ));
        assert_eq!(failure, DieselFailure::UniqueViolation { constraint: None });
        assert!(!failure.involves(constraints::STUDENT_EMAIL_UNIQUE));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        assert!(matches!(
            classify_diesel_error(DieselError::NotFound),
            DieselFailure::Query(_)
        ));
    }
}

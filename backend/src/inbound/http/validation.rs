//! Translation of domain validation failures into `invalid_request` errors.
//!
//! Every validation error carries `details: { field, code }` so clients can
//! attach the message to the offending input.

use serde_json::json;

use crate::domain::{
    CourseValidationError, CredentialsValidationError, Error, IdentifierError,
    StudentValidationError,
};

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

pub(crate) fn student_error(err: StudentValidationError) -> Error {
    let code = match err {
        StudentValidationError::EmptyName => "empty_name",
        StudentValidationError::NameTooLong { .. } => "name_too_long",
        StudentValidationError::EmptyEmail => "empty_email",
        StudentValidationError::EmailTooLong { .. } => "email_too_long",
        StudentValidationError::MalformedEmail => "malformed_email",
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn course_error(err: CourseValidationError) -> Error {
    let code = match err {
        CourseValidationError::EmptyTitle => "empty_title",
        CourseValidationError::TitleTooLong { .. } => "title_too_long",
        CourseValidationError::DescriptionTooLong { .. } => "description_too_long",
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn password_error(err: CredentialsValidationError) -> Error {
    let code = match err {
        CredentialsValidationError::EmptyPrincipal => "empty_principal",
        CredentialsValidationError::EmptyPassword => "empty_password",
        CredentialsValidationError::PasswordTooLong { .. } => "password_too_long",
    };
    field_error("password", code, err.to_string())
}

/// Parse a raw identifier from a path segment or payload field.
///
/// Identifiers must be positive 32-bit integers; anything else is a client
/// error rather than a missing resource.
pub(crate) fn parse_id<I>(field: &str, raw: i64) -> Result<I, Error>
where
    I: TryFrom<i64, Error = IdentifierError>,
{
    I::try_from(raw).map_err(|err| field_error(field, "invalid_id", err.to_string()))
}

/// Parse a path segment holding an identifier.
pub(crate) fn parse_path_id<I>(raw: &str) -> Result<I, Error>
where
    I: TryFrom<i64, Error = IdentifierError>,
{
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| field_error("id", "invalid_id", format!("{raw:?} is not an identifier")))?;
    parse_id("id", value)
}

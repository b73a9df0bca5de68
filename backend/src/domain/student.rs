//! Student data model.
//!
//! A student is both an enrollable party and the login principal: the email
//! address identifies them when credentials are checked.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::StudentId;

/// Maximum length, in characters, of a student name or course title.
pub const NAME_MAX: usize = 128;
/// Maximum length, in characters, of an email address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by the student value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyName,
    NameTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    MalformedEmail,
}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::MalformedEmail => write!(f, "email must look like local@domain"),
        }
    }
}

impl std::error::Error for StudentValidationError {}

impl StudentValidationError {
    /// Payload field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::MalformedEmail => "email",
        }
    }
}

/// Student display name, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "Ada Lovelace")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(StudentValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PersonName {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

/// Email address acting as the login principal.
///
/// ## Invariants
/// - Trimmed, non-empty and at most [`EMAIL_MAX`] characters.
/// - Exactly one `@` with a non-empty local part and domain.
/// - No whitespace anywhere.
/// - Compared as an exact string; no case folding is applied.
///
/// # Examples
/// ```
/// use registrar::domain::Email;
///
/// let email = Email::new("  ada@example.com ").unwrap();
/// assert_eq!(email.as_str(), "ada@example.com");
/// assert!(Email::new("ada@@example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ada@example.com")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(StudentValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(StudentValidationError::MalformedEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(StudentValidationError::MalformedEmail),
        }
    }

    /// Borrow the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Opaque one-way password hash.
///
/// The encoded form belongs to whichever hasher produced it. `Debug` never
/// prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher or read from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string for persistence.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Values required to insert a new student; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: PersonName,
    pub email: Email,
    pub password_hash: PasswordHash,
}

/// Persisted student record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    name: PersonName,
    email: Email,
    password_hash: PasswordHash,
}

impl Student {
    /// Combine a store-assigned id with the draft values.
    #[must_use]
    pub fn from_draft(id: StudentId, draft: StudentDraft) -> Self {
        let StudentDraft {
            name,
            email,
            password_hash,
        } = draft;
        Self {
            id,
            name,
            email,
            password_hash,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> StudentId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Login principal.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored credential hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Replace the name and email, keeping id and credentials.
    #[must_use]
    pub fn with_profile(self, name: PersonName, email: Email) -> Self {
        Self {
            name,
            email,
            ..self
        }
    }

    /// Replace the stored credential hash.
    #[must_use]
    pub fn with_password_hash(self, password_hash: PasswordHash) -> Self {
        Self {
            password_hash,
            ..self
        }
    }
}

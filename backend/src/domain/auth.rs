//! Authentication primitives: submitted credentials, new passwords and the
//! principal capability.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{PasswordHash, Student};

/// Maximum length, in characters, of a password.
pub const PASSWORD_MAX: usize = 128;

/// Domain error returned when credential or password values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Principal was missing or blank once trimmed.
    EmptyPrincipal,
    /// Password was empty.
    EmptyPassword,
    /// Password exceeded [`PASSWORD_MAX`] characters.
    PasswordTooLong { max: usize },
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPrincipal => write!(f, "principal must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// New plaintext password supplied when creating or updating a student.
///
/// ## Invariants
/// - Non-empty and at most [`PASSWORD_MAX`] characters.
/// - Whitespace is preserved.
/// - The buffer is zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a plaintext password.
    pub fn new(raw: &str) -> Result<Self, CredentialsValidationError> {
        if raw.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if raw.chars().count() > PASSWORD_MAX {
            return Err(CredentialsValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plaintext value for hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Credentials submitted with a request.
///
/// ## Invariants
/// - `principal` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use registrar::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" ada@example.com ", "secret").unwrap();
/// assert_eq!(creds.principal(), "ada@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    principal: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw principal/password inputs.
    pub fn try_from_parts(
        principal: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = principal.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyPrincipal);
        }

        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            principal: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Principal name (email) used for the student lookup.
    #[must_use]
    pub fn principal(&self) -> &str {
        self.principal.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("principal", &self.principal)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Capability of anything that can be authenticated by name and hash.
pub trait Principal {
    /// Name the principal logs in with.
    fn principal_name(&self) -> &str;

    /// Stored credential hash to verify submitted passwords against.
    fn credential_hash(&self) -> &PasswordHash;

    /// Whether the principal may currently authenticate.
    fn is_active(&self) -> bool;
}

impl Principal for Student {
    fn principal_name(&self) -> &str {
        self.email().as_str()
    }

    fn credential_hash(&self) -> &PasswordHash {
        self.password_hash()
    }

    fn is_active(&self) -> bool {
        true
    }
}

//! Identity resolution and credential verification.
//!
//! A student's email is their login principal. Resolution succeeds only when
//! exactly one student carries the submitted email; verification delegates
//! to the injected [`PasswordHasher`]. Callers outside the domain only ever
//! see one generic `unauthorized` error, whatever the underlying reason.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::auth::Principal;
use super::ports::{LoginService, PasswordHasher, StudentRepository};
use super::repository_errors::map_student_error;
use super::{Credentials, Error, Student};

/// Why an authentication attempt was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthenticationFailure {
    /// No student carries the principal.
    #[error("no student uses the principal")]
    UnknownPrincipal,
    /// More than one student carries the principal.
    #[error("{matches} students share the principal")]
    AmbiguousPrincipal { matches: usize },
    /// The password did not match the stored hash.
    #[error("password does not match")]
    WrongPassword,
    /// The principal exists but may not authenticate.
    #[error("principal is inactive")]
    Inactive,
    /// The student store could not be consulted.
    #[error(transparent)]
    Unavailable(Error),
}

/// Maps a principal name to the single student it identifies.
pub struct IdentityResolver<S> {
    students: Arc<S>,
}

impl<S> Clone for IdentityResolver<S> {
    fn clone(&self) -> Self {
        Self {
            students: Arc::clone(&self.students),
        }
    }
}

impl<S> IdentityResolver<S>
where
    S: StudentRepository,
{
    /// Create a resolver over the student store.
    pub fn new(students: Arc<S>) -> Self {
        Self { students }
    }

    /// Resolve `email` to exactly one student.
    pub async fn resolve_principal(&self, email: &str) -> Result<Student, AuthenticationFailure> {
        let mut matches = self
            .students
            .find_by_email(email)
            .await
            .map_err(|err| AuthenticationFailure::Unavailable(map_student_error(err)))?;

        match matches.len() {
            0 => Err(AuthenticationFailure::UnknownPrincipal),
            1 => matches.pop().ok_or(AuthenticationFailure::UnknownPrincipal),
            count => Err(AuthenticationFailure::AmbiguousPrincipal { matches: count }),
        }
    }
}

/// Login service backed by the student store and a password hasher.
pub struct CredentialLoginService<S> {
    resolver: IdentityResolver<S>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<S> CredentialLoginService<S>
where
    S: StudentRepository,
{
    /// Create the login service.
    pub fn new(students: Arc<S>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            resolver: IdentityResolver::new(students),
            hasher,
        }
    }

    async fn verify(&self, credentials: &Credentials) -> Result<Student, AuthenticationFailure> {
        let student = self
            .resolver
            .resolve_principal(credentials.principal())
            .await?;
        if !student.is_active() {
            return Err(AuthenticationFailure::Inactive);
        }
        if !self
            .hasher
            .verify(credentials.password(), student.credential_hash())
        {
            return Err(AuthenticationFailure::WrongPassword);
        }
        Ok(student)
    }
}

#[async_trait]
impl<S> LoginService for CredentialLoginService<S>
where
    S: StudentRepository,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<Student, Error> {
        match self.verify(credentials).await {
            Ok(student) => Ok(student),
            Err(AuthenticationFailure::Unavailable(error)) => Err(error),
            Err(reason) => {
                debug!(
                    principal = credentials.principal(),
                    %reason,
                    "authentication rejected"
                );
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}

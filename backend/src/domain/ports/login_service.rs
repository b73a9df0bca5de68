//! Driving port for request authentication.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing the backing infrastructure, so
//! handler tests can substitute a test double instead of wiring stores.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, Student};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Resolve the principal and verify the password.
    ///
    /// Every failure is reported as the same generic `unauthorized` error.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Student, Error>;
}

//! Port for one-way password hashing.
//!
//! The domain never picks an algorithm; services receive a hasher and only
//! ever see the opaque [`PasswordHash`] it produces.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a password hash.
    pub enum PasswordHashError {
        /// The hasher could not produce a hash.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// One-way password hashing strategy.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash of a new password.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Whether `candidate` matches the stored hash. Unparseable hashes never match.
    fn verify(&self, candidate: &str, hash: &PasswordHash) -> bool;
}

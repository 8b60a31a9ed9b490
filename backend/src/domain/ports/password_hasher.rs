//! Driven port for password hashing.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing or verification failed.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Port for deriving and checking password hashes.
///
/// Implementations are expected to be slow on purpose; they should keep the
/// work off the async executor threads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Derive a salted hash of `password`.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash.
    async fn verify(&self, password: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}

//! Driven port for user account persistence.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The backing store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// A unique column already holds the value.
        Duplicate { field: String } => "user with this {field} already exists",
    }
}

/// Port for looking up and inserting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by (already normalised) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Whether any user holds `email` or `user_name`.
    async fn exists_with(
        &self,
        email: &str,
        user_name: &str,
    ) -> Result<bool, UserPersistenceError>;

    /// Insert a new user, failing with
    /// [`UserPersistenceError::Duplicate`] if a unique field is taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;
}

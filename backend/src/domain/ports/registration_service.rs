//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, UserProfile};

/// Domain use-case port creating employee accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a user with role `employee`.
    ///
    /// Fails with `Conflict` when the email or user name is already taken.
    async fn register(&self, registration: &Registration) -> Result<UserProfile, Error>;
}

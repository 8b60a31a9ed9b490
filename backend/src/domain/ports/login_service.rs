//! Driving port for login.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing store or hashing scheme.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and open a session.
    ///
    /// Unknown emails and wrong passwords both fail with
    /// `InvalidCredentials`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}

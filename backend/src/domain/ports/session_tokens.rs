//! Driven port for minting session tokens.

use crate::domain::{SessionToken, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised while issuing a token.
    pub enum TokenIssueError {
        /// Encoding or signing the token failed.
        Encoding { message: String } => "session token encoding failed: {message}",
    }
}

/// Port issuing one token per successful login.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokenIssuer: Send + Sync {
    /// Issue a token identifying `user`.
    fn issue(&self, user: &UserProfile) -> Result<SessionToken, TokenIssueError>;
}

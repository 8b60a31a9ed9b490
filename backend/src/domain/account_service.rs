//! Account service: registration and login.
//!
//! Passwords are hashed through the [`PasswordHasher`] port and sessions are
//! minted through the [`SessionTokenIssuer`] port; the service never sees
//! the hashing scheme or the token format.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, SessionTokenIssuer,
    TokenIssueError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, LoginOutcome, Registration, Role, User, UserId, UserProfile,
};

pub(crate) const USER_EXISTS: &str = "User already exists";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => {
            Error::conflict(USER_EXISTS).with_detail(format!("{field} already registered"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenIssueError) -> Error {
    Error::internal(error.to_string())
}

/// Service implementing [`RegistrationService`] and [`LoginService`].
pub struct AccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> Clone for AccountService<U, H, T> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<U, H, T> AccountService<U, H, T> {
    /// Create a service over the user store, hasher and token issuer.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<U, H, T> RegistrationService for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: SessionTokenIssuer,
{
    async fn register(&self, registration: &Registration) -> Result<UserProfile, Error> {
        let taken = self
            .users
            .exists_with(registration.email(), registration.user_name())
            .await
            .map_err(map_user_error)?;
        if taken {
            return Err(Error::conflict(USER_EXISTS));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;
        let user = User::new(
            UserProfile {
                id: UserId::random(),
                full_name: registration.full_name().to_owned(),
                email: registration.email().to_owned(),
                user_name: registration.user_name().to_owned(),
                role: Role::Employee,
            },
            password_hash,
        );

        // The store re-checks uniqueness; a lost race maps to Conflict too.
        self.users.insert(&user).await.map_err(map_user_error)?;

        info!(user_id = %user.id(), "user registered");
        Ok(user.into_profile())
    }
}

#[async_trait]
impl<U, H, T> LoginService for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: SessionTokenIssuer,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::invalid_credentials());
        }

        let token = self
            .tokens
            .issue(user.profile())
            .map_err(map_token_error)?;
        info!(user_id = %user.id(), "user logged in");
        Ok(LoginOutcome {
            token,
            user: user.into_profile(),
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;

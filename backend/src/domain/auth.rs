//! Authentication primitives: login credentials, registration requests and
//! session tokens.
//!
//! Inbound adapters hand raw strings to the constructors here so that
//! trimming and emptiness checks happen once, before any port is called.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::UserProfile;

/// Rejections raised while validating login or registration input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsValidationError {
    /// Full name was blank.
    #[error("full name must not be empty")]
    EmptyFullName,
    /// Email was blank.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email lacked an `@` separating local part and domain.
    #[error("email must contain '@'")]
    MalformedEmail,
    /// User name was blank.
    #[error("user name must not be empty")]
    EmptyUserName,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl CredentialsValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyFullName => "fullName",
            Self::EmptyEmail | Self::MalformedEmail => "email",
            Self::EmptyUserName => "userName",
            Self::EmptyPassword => "password",
        }
    }
}

fn normalise_email(raw: &str) -> Result<String, CredentialsValidationError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(CredentialsValidationError::EmptyEmail);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(email.to_lowercase())
        }
        _ => Err(CredentialsValidationError::MalformedEmail),
    }
}

fn require_password(raw: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if raw.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(raw.to_owned()))
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and contains `@`.
/// - `password` is non-empty and kept verbatim (no trimming).
///
/// # Examples
/// ```
/// use inventory_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Admin@Test.com ", "admin123").unwrap();
/// assert_eq!(creds.email(), "admin@test.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw login input.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: normalise_email(email)?,
            password: require_password(password)?,
        })
    }

    /// Normalised email used for the lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as typed by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Validated registration request.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    full_name: String,
    email: String,
    user_name: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration input.
    pub fn try_from_parts(
        full_name: &str,
        email: &str,
        user_name: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(CredentialsValidationError::EmptyFullName);
        }
        let email = normalise_email(email)?;
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Err(CredentialsValidationError::EmptyUserName);
        }
        Ok(Self {
            full_name: full_name.to_owned(),
            email,
            user_name: user_name.to_owned(),
            password: require_password(password)?,
        })
    }

    /// Trimmed full name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Normalised email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Trimmed user name.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Password as typed by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("user_name", &self.user_name)
            .finish_non_exhaustive()
    }
}

/// Session token handed out on login.
///
/// Endpoints do not check it; clients echo it back as a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Token for the new session.
    pub token: SessionToken,
    /// Profile of the authenticated user.
    pub user: UserProfile,
}

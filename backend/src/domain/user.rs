//! User accounts.
//!
//! A [`User`] is created at registration (or by default-data seeding) and is
//! immutable afterwards. Only the bcrypt hash of the password is kept, and
//! the hash never leaves the domain: clients see [`UserProfile`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role carried in the user profile. Not enforced by any endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator.
    Admin,
    /// Regular employee; every self-registered user gets this role.
    Employee,
}

impl Role {
    /// Lowercase label, also used as the stored column value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored role label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Opaque password hash produced by a
/// [`PasswordHasher`](crate::domain::ports::PasswordHasher).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a hash string as produced or stored by an adapter.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Borrow the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Public view of a user: everything except the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// Full name.
    #[schema(example = "Admin User")]
    pub full_name: String,
    /// Lower-cased email address.
    #[schema(example = "admin@test.com")]
    pub email: String,
    /// Login handle.
    #[schema(example = "admin")]
    pub user_name: String,
    /// Assigned role.
    pub role: Role,
}

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    profile: UserProfile,
    password_hash: PasswordHash,
}

impl User {
    /// Assemble a user from its profile and password hash.
    #[must_use]
    pub fn new(profile: UserProfile, password_hash: PasswordHash) -> Self {
        Self {
            profile,
            password_hash,
        }
    }

    /// User identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.profile.id
    }

    /// Lower-cased email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.profile.email
    }

    /// Login handle.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.profile.user_name
    }

    /// Assigned role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.profile.role
    }

    /// Stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Public profile.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Consume the user, keeping only the public profile.
    #[must_use]
    pub fn into_profile(self) -> UserProfile {
        self.profile
    }
}

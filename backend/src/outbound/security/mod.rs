//! Credential adapters: password hashing and session token signing.

mod bcrypt_hasher;
mod jwt_tokens;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use jwt_tokens::{JwtSessionTokenIssuer, SessionClaims};

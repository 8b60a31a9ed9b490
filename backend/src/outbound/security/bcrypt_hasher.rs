//! bcrypt implementation of the [`PasswordHasher`] port.
//!
//! bcrypt is deliberately CPU-heavy, so both operations run on the blocking
//! thread pool instead of an executor thread.

use async_trait::async_trait;
use tokio::task;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Password hasher backed by the `bcrypt` crate.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher using `cost` rounds (log2); clamped to bcrypt's 4..=31 range.
    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

fn map_bcrypt_error(error: bcrypt::BcryptError) -> PasswordHashError {
    PasswordHashError::hashing(error.to_string())
}

fn map_join_error(error: task::JoinError) -> PasswordHashError {
    PasswordHashError::hashing(format!("hashing task failed: {error}"))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let hashed = task::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
            .await
            .map_err(map_join_error)?
            .map_err(map_bcrypt_error)?;
        Ok(PasswordHash::new(hashed))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let hash = hash.as_str().to_owned();
        task::spawn_blocking(move || bcrypt::verify(password.as_str(), &hash))
            .await
            .map_err(map_join_error)?
            .map_err(map_bcrypt_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(4)
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_verify_only_the_original_password(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash("admin123").await.expect("hash");
        assert_ne!(hash.as_str(), "admin123");
        assert!(hasher.verify("admin123", &hash).await.expect("verify"));
        assert!(!hasher.verify("admin124", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hashes_are_errors(hasher: BcryptPasswordHasher) {
        let result = hasher
            .verify("admin123", &PasswordHash::new("plaintext"))
            .await;
        assert!(result.is_err());
    }

    #[rstest]
    #[case(0, 4)]
    #[case(12, 12)]
    #[case(99, 31)]
    fn cost_is_clamped(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(BcryptPasswordHasher::new(requested).cost, expected);
    }
}

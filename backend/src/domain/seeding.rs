//! Default data seeding.
//!
//! On first start the store is empty; the seeder inserts two demo accounts
//! and three demo items so the application is usable immediately. Seeding
//! writes no history: it provides starting stock, not client mutations.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{PasswordHashError, PasswordHasher, SeedRepository, SeedRepositoryError};
use crate::domain::{
    InventoryItem, ItemDraft, ItemId, ItemValidationError, Role, User, UserId, UserProfile,
};

struct DefaultUser {
    full_name: &'static str,
    email: &'static str,
    user_name: &'static str,
    password: &'static str,
    role: Role,
}

const DEFAULT_USERS: [DefaultUser; 2] = [
    DefaultUser {
        full_name: "Admin User",
        email: "admin@test.com",
        user_name: "admin",
        password: "admin123",
        role: Role::Admin,
    },
    DefaultUser {
        full_name: "Employee User",
        email: "employee@test.com",
        user_name: "employee",
        password: "emp123",
        role: Role::Employee,
    },
];

const DEFAULT_ITEMS: [(&str, &str, u32, f64); 3] = [
    ("Cotton Fabric", "Fabric", 50, 4000.0),
    ("Lockstitch Machine", "Sewing Machine", 5, 40000.0),
    ("Colored Thread", "Thread", 100, 800.0),
];

/// What a seeding run wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOutcome {
    /// Default users were inserted.
    pub users_seeded: bool,
    /// Default items were inserted.
    pub items_seeded: bool,
}

/// Errors raised while seeding default data.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// A default password could not be hashed.
    #[error("failed to hash default password: {0}")]
    Hashing(#[from] PasswordHashError),
    /// A default item failed validation.
    #[error("default item is invalid: {0}")]
    InvalidItem(#[from] ItemValidationError),
    /// The store rejected the inserts.
    #[error("default data persistence error: {0}")]
    Persistence(#[from] SeedRepositoryError),
}

/// Seeds default users and items into empty collections.
pub struct DefaultDataSeeder<S, H> {
    repository: Arc<S>,
    hasher: Arc<H>,
}

impl<S, H> DefaultDataSeeder<S, H> {
    /// Create a seeder over the seed repository and password hasher.
    pub fn new(repository: Arc<S>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }
}

impl<S, H> DefaultDataSeeder<S, H>
where
    S: SeedRepository,
    H: PasswordHasher,
{
    /// Insert default users and items where the collections are empty.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError`] when hashing or persistence fails.
    pub async fn seed(&self) -> Result<SeedOutcome, SeedingError> {
        let users = self.default_users().await?;
        let users_seeded = self.repository.seed_users_if_empty(&users).await?;

        let items = default_items()?;
        let items_seeded = self.repository.seed_items_if_empty(&items).await?;

        info!(users_seeded, items_seeded, "default data seeding finished");
        Ok(SeedOutcome {
            users_seeded,
            items_seeded,
        })
    }

    async fn default_users(&self) -> Result<Vec<User>, SeedingError> {
        let mut users = Vec::with_capacity(DEFAULT_USERS.len());
        for seed in &DEFAULT_USERS {
            let password_hash = self.hasher.hash(seed.password).await?;
            users.push(User::new(
                UserProfile {
                    id: UserId::random(),
                    full_name: seed.full_name.to_owned(),
                    email: seed.email.to_owned(),
                    user_name: seed.user_name.to_owned(),
                    role: seed.role,
                },
                password_hash,
            ));
        }
        Ok(users)
    }
}

fn default_items() -> Result<Vec<InventoryItem>, ItemValidationError> {
    DEFAULT_ITEMS
        .iter()
        .map(|(name, category, quantity, price)| {
            ItemDraft::new(name, category, *quantity, *price)
                .map(|draft| InventoryItem::new(ItemId::random(), draft))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PasswordHash;
    use crate::domain::ports::{MockPasswordHasher, MockSeedRepository};
    use rstest::rstest;

    fn hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(2)
            .returning(|password| Ok(PasswordHash::new(format!("hashed:{password}"))));
        hasher
    }

    #[rstest]
    #[tokio::test]
    async fn empty_store_receives_defaults() {
        let mut repo = MockSeedRepository::new();
        repo.expect_seed_users_if_empty()
            .withf(|users| {
                users.len() == 2
                    && users[0].role() == Role::Admin
                    && users[1].email() == "employee@test.com"
                    && users[1].password_hash().as_str() == "hashed:emp123"
            })
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_seed_items_if_empty()
            .withf(|items| {
                items.iter().map(InventoryItem::name).collect::<Vec<_>>()
                    == ["Cotton Fabric", "Lockstitch Machine", "Colored Thread"]
            })
            .times(1)
            .returning(|_| Ok(true));

        let outcome = DefaultDataSeeder::new(Arc::new(repo), Arc::new(hasher()))
            .seed()
            .await
            .expect("seeded");
        assert_eq!(
            outcome,
            SeedOutcome {
                users_seeded: true,
                items_seeded: true
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn populated_store_is_left_alone() {
        let mut repo = MockSeedRepository::new();
        repo.expect_seed_users_if_empty().returning(|_| Ok(false));
        repo.expect_seed_items_if_empty().returning(|_| Ok(false));

        let outcome = DefaultDataSeeder::new(Arc::new(repo), Arc::new(hasher()))
            .seed()
            .await
            .expect("seeded");
        assert_eq!(outcome, SeedOutcome::default());
    }

    #[rstest]
    #[tokio::test]
    async fn persistence_failures_abort_seeding() {
        let mut repo = MockSeedRepository::new();
        repo.expect_seed_users_if_empty()
            .returning(|_| Err(SeedRepositoryError::connection("refused")));
        repo.expect_seed_items_if_empty().never();

        let err = DefaultDataSeeder::new(Arc::new(repo), Arc::new(hasher()))
            .seed()
            .await
            .expect_err("failure");
        assert!(matches!(err, SeedingError::Persistence(_)));
    }
}

//! Builders wiring storage adapters into the domain services behind
//! [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;

use inventory_backend::domain::ports::{HistoryRepository, InventoryRepository, UserRepository};
use inventory_backend::domain::{
    AccountService, DefaultDataSeeder, HistoryService, InventoryService, SeedOutcome,
    SeedingError,
};
use inventory_backend::inbound::http::state::HttpState;
use inventory_backend::outbound::memory::InMemoryStore;
use inventory_backend::outbound::persistence::{
    DbPool, DieselHistoryRepository, DieselInventoryRepository, DieselSeedRepository,
    DieselUserRepository,
};
use inventory_backend::outbound::security::{BcryptPasswordHasher, JwtSessionTokenIssuer};

/// Backing store selected at startup.
pub enum Storage {
    /// PostgreSQL through the Diesel adapters.
    Postgres(DbPool),
    /// Process-local store; contents are lost on restart.
    Memory(Arc<InMemoryStore>),
}

/// Password hashing and token signing shared by registration and login.
#[derive(Clone)]
pub struct AccountSecurity {
    hasher: Arc<BcryptPasswordHasher>,
    tokens: Arc<JwtSessionTokenIssuer>,
}

impl AccountSecurity {
    /// Bundle the credential adapters.
    pub fn new(hasher: Arc<BcryptPasswordHasher>, tokens: Arc<JwtSessionTokenIssuer>) -> Self {
        Self { hasher, tokens }
    }
}

fn assemble<I, H, U>(
    items: Arc<I>,
    history: Arc<H>,
    users: Arc<U>,
    security: &AccountSecurity,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    I: InventoryRepository + 'static,
    H: HistoryRepository + 'static,
    U: UserRepository + 'static,
{
    HttpState::from_services(
        Arc::new(InventoryService::new(items, clock)),
        Arc::new(HistoryService::new(history)),
        Arc::new(AccountService::new(
            users,
            security.hasher.clone(),
            security.tokens.clone(),
        )),
    )
}

/// Build handler state over the selected store.
pub fn build_http_state(
    storage: &Storage,
    security: &AccountSecurity,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState> {
    let state = match storage {
        Storage::Postgres(pool) => assemble(
            Arc::new(DieselInventoryRepository::new(pool.clone())),
            Arc::new(DieselHistoryRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            security,
            clock,
        ),
        Storage::Memory(store) => {
            assemble(store.clone(), store.clone(), store.clone(), security, clock)
        }
    };
    web::Data::new(state)
}

/// Insert the default accounts and items into empty collections.
pub async fn seed_default_data(
    storage: &Storage,
    security: &AccountSecurity,
) -> Result<SeedOutcome, SeedingError> {
    match storage {
        Storage::Postgres(pool) => {
            DefaultDataSeeder::new(
                Arc::new(DieselSeedRepository::new(pool.clone())),
                security.hasher.clone(),
            )
            .seed()
            .await
        }
        Storage::Memory(store) => {
            DefaultDataSeeder::new(store.clone(), security.hasher.clone())
                .seed()
                .await
        }
    }
}

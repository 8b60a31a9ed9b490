//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel row structs and domain types and
//! contain no business logic. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a `bb8`
//! pool through `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use inventory_backend::outbound::persistence::{DbPool, DieselInventoryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/inventory")).await?;
//! let repo = DieselInventoryRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_history_repository;
mod diesel_inventory_repository;
mod diesel_seed_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_history_repository::DieselHistoryRepository;
pub use diesel_inventory_repository::DieselInventoryRepository;
pub use diesel_seed_repository::DieselSeedRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports are called by inbound adapters; driven ports are implemented
//! by outbound adapters (databases, hashing, token signing). Each driven port
//! exposes a typed error enum so adapters map their failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod history_query;
mod history_repository;
mod inventory_command;
mod inventory_query;
mod inventory_repository;
mod login_service;
mod password_hasher;
mod registration_service;
mod seed_repository;
mod session_tokens;
mod user_repository;

#[cfg(test)]
pub use history_query::MockHistoryQuery;
pub use history_query::HistoryQuery;
#[cfg(test)]
pub use history_repository::MockHistoryRepository;
pub use history_repository::{HistoryRepository, HistoryRepositoryError};
#[cfg(test)]
pub use inventory_command::MockInventoryCommand;
pub use inventory_command::InventoryCommand;
#[cfg(test)]
pub use inventory_query::MockInventoryQuery;
pub use inventory_query::InventoryQuery;
#[cfg(test)]
pub use inventory_repository::MockInventoryRepository;
pub use inventory_repository::{InventoryRepository, InventoryRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use seed_repository::MockSeedRepository;
pub use seed_repository::{SeedRepository, SeedRepositoryError};
#[cfg(test)]
pub use session_tokens::MockSessionTokenIssuer;
pub use session_tokens::{SessionTokenIssuer, TokenIssueError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

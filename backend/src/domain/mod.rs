//! Domain primitives, services and ports.
//!
//! Purpose: define the transport-agnostic types used by the HTTP adapter and
//! the persistence adapters, plus the services implementing the driving
//! ports. Types are immutable once validated; invariants and serialisation
//! contracts are documented on each type.
//!
//! Public surface:
//! - Error / ErrorCode: error payload shared by every endpoint.
//! - InventoryItem / ItemDraft / ItemInput: stock records and their input.
//! - HistoryEntry / HistoryAction / AuditStamp: the audit trail.
//! - User / UserProfile / Role: accounts.
//! - Registration / LoginCredentials / SessionToken: authentication input
//!   and output.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod history;
pub mod history_service;
pub mod inventory;
pub mod inventory_service;
pub mod ports;
pub mod seeding;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    CredentialsValidationError, LoginCredentials, LoginOutcome, Registration, SessionToken,
};
pub use self::error::{Error, ErrorCode};
pub use self::history::{AuditStamp, HistoryAction, HistoryEntry, UnknownHistoryAction};
pub use self::history_service::HistoryService;
pub use self::inventory::{
    InventoryItem, ItemDraft, ItemId, ItemInput, ItemValidationError, MAX_QUANTITY,
};
pub use self::inventory_service::InventoryService;
pub use self::seeding::{DefaultDataSeeder, SeedOutcome, SeedingError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{PasswordHash, Role, UnknownRole, User, UserId, UserProfile};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use inventory_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Product not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

//! HTTP inbound adapter exposing the REST endpoints.
//!
//! All business routes live under `/api`; health probes and API docs are
//! mounted by the server next to them.

pub mod auth;
pub mod error;
pub mod health;
pub mod history;
pub mod inventory;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::{Scope, web};

pub use crate::domain::ApiResult;
pub use error::json_error_handler;

/// The `/api` scope with every business route registered.
///
/// The caller provides [`state::HttpState`] and [`json_config`] as app data.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(auth::register)
        .service(auth::login)
        .service(inventory::list_inventory)
        .service(inventory::add_product)
        .service(inventory::update_product)
        .service(inventory::delete_product)
        .service(history::list_history)
}

/// JSON extractor settings rendering body errors as `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

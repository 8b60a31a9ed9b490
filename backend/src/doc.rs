//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler annotated with `#[utoipa::path]` and the
//! request, response and domain schemas they reference. Swagger UI serves it
//! in debug builds and `cargo run --bin openapi-dump` prints it as JSON.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

use crate::domain::{
    Error, ErrorCode, HistoryAction, HistoryEntry, InventoryItem, Role, SessionToken, UserProfile,
};
use crate::inbound::http::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::inbound::http::inventory::{ItemRequest, MessageResponse, ProductResponse};

/// Document the bearer token clients attach after login. No endpoint
/// requires it.
struct BearerAddon;

impl Modify for BearerAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(openapi::Components::default);
        components.add_security_scheme(
            "SessionToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the inventory REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAddon),
    info(
        title = "Inventory backend API",
        description = "Inventory CRUD with an append-only audit trail, account registration and login."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::inventory::list_inventory,
        crate::inbound::http::inventory::add_product,
        crate::inbound::http::inventory::update_product,
        crate::inbound::http::inventory::delete_product,
        crate::inbound::http::history::list_history,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        InventoryItem,
        HistoryEntry,
        HistoryAction,
        UserProfile,
        Role,
        SessionToken,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        ItemRequest,
        ProductResponse,
        MessageResponse,
    )),
    tags(
        (name = "auth", description = "Account registration and login"),
        (name = "inventory", description = "Inventory items; every change is recorded in history"),
        (name = "history", description = "Append-only audit trail"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).unwrap_or_else(|| panic!("{name} schema")) {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("InventoryItem", &["id", "name", "category", "quantity", "price"])]
    #[case("HistoryEntry", &["id", "action", "product", "timestamp"])]
    #[case("UserProfile", &["id", "fullName", "email", "userName", "role"])]
    #[case("Error", &["code", "message", "error", "traceId"])]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let actual = object_fields(name);
        for field in fields {
            assert!(actual.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/inventory",
            "/api/inventory/{id}",
            "/api/history",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}

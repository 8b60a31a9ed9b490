//! Inventory API handlers.
//!
//! ```text
//! GET    /api/inventory
//! POST   /api/inventory      {"name":"Cotton Fabric","category":"Fabric","quantity":50,"price":4000}
//! PUT    /api/inventory/{id} {"name":"Cotton Fabric","category":"Fabric","quantity":"45","price":4000}
//! DELETE /api/inventory/{id}
//! ```
//!
//! `quantity` and `price` are forwarded as raw JSON so the domain can apply
//! its coercion rules to numbers and numeric strings alike.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::inventory_service::PRODUCT_NOT_FOUND;
use crate::domain::{ApiResult, Error, InventoryItem, ItemId, ItemInput};
use crate::inbound::http::state::HttpState;

/// Item fields sent on create and update. Update replaces all four.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemRequest {
    #[schema(example = "Cotton Fabric")]
    pub name: Option<String>,
    #[schema(example = "Fabric")]
    pub category: Option<String>,
    /// Whole number, or a numeric string.
    #[schema(value_type = Option<f64>, example = 50)]
    pub quantity: Option<Value>,
    /// Unit price; non-numeric values count as zero.
    #[schema(value_type = Option<f64>, example = 4000)]
    pub price: Option<Value>,
}

impl From<ItemRequest> for ItemInput {
    fn from(value: ItemRequest) -> Self {
        Self {
            name: value.name,
            category: value.category,
            quantity: value.quantity,
            price: value.price,
        }
    }
}

/// Envelope returned by create and update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = "Product added successfully")]
    pub message: String,
    pub product: InventoryItem,
}

/// Envelope carrying only a confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Product deleted successfully")]
    pub message: String,
}

// An id that is not a UUID cannot name a stored item.
fn parse_item_id(raw: &str) -> Result<ItemId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(PRODUCT_NOT_FOUND).with_detail("malformed product id"))
}

/// List every inventory item.
#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (status = 200, description = "Inventory items", body = [InventoryItem]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["inventory"],
    operation_id = "listInventory"
)]
#[get("/inventory")]
pub async fn list_inventory(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<InventoryItem>>> {
    let items = state.inventory_query.list_items().await?;
    Ok(web::Json(items))
}

/// Add an item and record an `Added` history entry.
#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = ItemRequest,
    responses(
        (status = 201, description = "Item created", body = ProductResponse),
        (status = 400, description = "Invalid item", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["inventory"],
    operation_id = "addProduct"
)]
#[post("/inventory")]
pub async fn add_product(
    state: web::Data<HttpState>,
    payload: web::Json<ItemRequest>,
) -> ApiResult<HttpResponse> {
    let product = state
        .inventory
        .create_item(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ProductResponse {
        message: "Product added successfully".to_owned(),
        product,
    }))
}

/// Replace an item's fields and record an `Updated` history entry.
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ProductResponse),
        (status = 400, description = "Invalid item", body = Error),
        (status = 404, description = "Product not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["inventory"],
    operation_id = "updateProduct"
)]
#[put("/inventory/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ItemRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_item_id(&path)?;
    let product = state
        .inventory
        .update_item(id, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(ProductResponse {
        message: "Product updated successfully".to_owned(),
        product,
    }))
}

/// Remove an item and record a `Deleted` history entry.
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 404, description = "Product not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["inventory"],
    operation_id = "deleteProduct"
)]
#[delete("/inventory/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_item_id(&path)?;
    state.inventory.delete_item(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Product deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ItemDraft;
    use crate::domain::ports::{MockInventoryCommand, MockInventoryQuery};
    use crate::inbound::http::test_utils::{state_with, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn fabric() -> InventoryItem {
        InventoryItem::new(
            ItemId::random(),
            ItemDraft::new("Cotton Fabric", "Fabric", 50, 4000.0).expect("valid draft"),
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn list_returns_bare_array(fabric: InventoryItem) {
        let mut query = MockInventoryQuery::new();
        let items = vec![fabric.clone()];
        query.expect_list_items().return_once(move || Ok(items));
        let state = state_with(|ports| ports.inventory_query = Arc::new(query));
        let app = actix_test::init_service(test_app(state)).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/inventory")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body,
            json!([{
                "id": fabric.id().to_string(),
                "name": "Cotton Fabric",
                "category": "Fabric",
                "quantity": 50,
                "price": 4000.0,
            }])
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn add_forwards_raw_numbers(fabric: InventoryItem) {
        let mut command = MockInventoryCommand::new();
        let created = fabric.clone();
        command
            .expect_create_item()
            .withf(|input| {
                input.name.as_deref() == Some("Cotton Fabric")
                    && input.quantity == Some(json!("50"))
                    && input.price.is_none()
            })
            .times(1)
            .return_once(move |_| Ok(created));
        let state = state_with(|ports| ports.inventory = Arc::new(command));
        let app = actix_test::init_service(test_app(state)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/inventory")
            .set_json(json!({"name": "Cotton Fabric", "category": "Fabric", "quantity": "50"}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Product added successfully"));
        assert_eq!(body["product"]["id"], json!(fabric.id().to_string()));
    }

    #[rstest]
    #[actix_web::test]
    async fn update_passes_path_id(fabric: InventoryItem) {
        let mut command = MockInventoryCommand::new();
        let id = fabric.id();
        let updated = fabric.clone();
        command
            .expect_update_item()
            .withf(move |requested, input| *requested == id && input.quantity == Some(json!(45)))
            .return_once(move |_, _| Ok(updated));
        let state = state_with(|ports| ports.inventory = Arc::new(command));
        let app = actix_test::init_service(test_app(state)).await;

        let req = actix_test::TestRequest::put()
            .uri(&format!("/api/inventory/{id}"))
            .set_json(json!({"name": "Cotton Fabric", "category": "Fabric", "quantity": 45, "price": 4000}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Product updated successfully"));
    }

    #[rstest]
    #[case::update("PUT")]
    #[case::delete("DELETE")]
    #[actix_web::test]
    async fn malformed_id_is_not_found(#[case] method: &str) {
        let mut command = MockInventoryCommand::new();
        command.expect_update_item().never();
        command.expect_delete_item().never();
        let state = state_with(|ports| ports.inventory = Arc::new(command));
        let app = actix_test::init_service(test_app(state)).await;

        let req = match method {
            "PUT" => actix_test::TestRequest::put()
                .uri("/api/inventory/not-a-uuid")
                .set_json(json!({"name": "x", "quantity": 1})),
            _ => actix_test::TestRequest::delete().uri("/api/inventory/not-a-uuid"),
        }
        .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Product not found"));
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_unknown_item_is_not_found() {
        let mut command = MockInventoryCommand::new();
        command
            .expect_delete_item()
            .return_once(|_| Err(Error::not_found(PRODUCT_NOT_FOUND)));
        let state = state_with(|ports| ports.inventory = Arc::new(command));
        let app = actix_test::init_service(test_app(state)).await;

        let req = actix_test::TestRequest::delete()
            .uri(&format!("/api/inventory/{}", ItemId::random()))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_confirms_with_message() {
        let mut command = MockInventoryCommand::new();
        command.expect_delete_item().times(1).return_once(|_| Ok(()));
        let state = state_with(|ports| ports.inventory = Arc::new(command));
        let app = actix_test::init_service(test_app(state)).await;

        let req = actix_test::TestRequest::delete()
            .uri(&format!("/api/inventory/{}", ItemId::random()))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({"message": "Product deleted successfully"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn storage_failures_are_redacted() {
        let mut command = MockInventoryCommand::new();
        command
            .expect_create_item()
            .return_once(|_| Err(Error::internal("inventory repository error: deadlock")));
        let state = state_with(|ports| ports.inventory = Arc::new(command));
        let app = actix_test::init_service(test_app(state)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/inventory")
            .set_json(json!({"name": "Thread", "quantity": 1}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Server error"));
        assert!(body["traceId"].is_string());
    }
}

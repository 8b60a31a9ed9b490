//! `HttpInventoryApi` and `ClientStore` against a mock backend.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::time::Duration;

use inventory_client::{
    ClientError, ClientStore, HistoryAction, HttpInventoryApi, InventoryApi, ProductInput,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ITEM_ID: &str = "3f2b8c1e-2a44-4d7e-9a51-6c0e8d2f1b77";

fn item(quantity: u32) -> Value {
    json!({
        "id": ITEM_ID,
        "name": "Cotton Fabric",
        "category": "Fabric",
        "quantity": quantity,
        "price": 4000.0,
    })
}

fn admin() -> Value {
    json!({
        "id": "5b1c7a86-7d5f-4a57-9f49-3a1c2f0d3c11",
        "fullName": "Admin User",
        "email": "admin@test.com",
        "userName": "admin",
        "role": "admin",
    })
}

fn api(server: &MockServer) -> HttpInventoryApi {
    HttpInventoryApi::new(&server.uri(), Duration::from_secs(5)).expect("client builds")
}

#[tokio::test]
async fn login_then_mutation_sends_bearer_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "admin@test.com", "password": "admin123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "token": "signed.jwt.token",
            "user": admin(),
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/inventory/{ITEM_ID}")))
        .and(header("authorization", "Bearer signed.jwt.token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Product updated successfully",
            "product": item(45),
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([item(45)])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "9d0c2f4e-1b6a-4c3d-8e7f-a1b2c3d4e5f6",
                "action": "Updated",
                "product": item(45),
                "timestamp": "2026-02-01T12:00:00Z",
            },
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let mut store = ClientStore::new(api(&server));
    store
        .login("admin@test.com", "admin123")
        .await
        .expect("login succeeds");
    assert_eq!(
        store.current_user().map(|user| user.user_name.as_str()),
        Some("admin")
    );

    let updated = store
        .update_product(
            ITEM_ID,
            &ProductInput {
                name: "Cotton Fabric".to_owned(),
                category: "Fabric".to_owned(),
                quantity: 45,
                price: 4000.0,
            },
        )
        .await
        .expect("update succeeds");
    assert_eq!(updated.quantity, 45);

    let state = store.state();
    assert_eq!(state.token.as_deref(), Some("signed.jwt.token"));
    assert_eq!(state.inventory.len(), 1);
    assert_eq!(
        state.history.first().map(|entry| entry.action),
        Some(HistoryAction::Updated)
    );
    assert!(!state.loading);
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/inventory/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "not_found",
            "message": "Product not found",
        })))
        .mount(&server)
        .await;

    let err = api(&server)
        .delete_product("missing")
        .await
        .expect_err("delete fails");
    assert_eq!(
        err,
        ClientError::Api {
            status: 404,
            message: "Product not found".to_owned(),
        }
    );
}

#[tokio::test]
async fn delete_accepts_message_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/inventory/{ITEM_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Product deleted successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    api(&server)
        .delete_product(ITEM_ID)
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn undecodable_success_body_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = api(&server)
        .list_history()
        .await
        .expect_err("body is not JSON");
    assert!(matches!(err, ClientError::Network { .. }));
}

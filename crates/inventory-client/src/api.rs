//! Transport port and its reqwest adapter.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;
use crate::model::{HistoryEntry, InventoryItem, NewAccount, ProductInput, Session, UserProfile};

/// Calls the backend REST API on behalf of the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Attach or clear the bearer token sent with later requests.
    fn set_token(&self, token: Option<String>);

    /// `POST /api/auth/login`.
    async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError>;

    /// `POST /api/auth/register`.
    async fn register(&self, account: &NewAccount) -> Result<UserProfile, ClientError>;

    /// `GET /api/inventory`.
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ClientError>;

    /// `POST /api/inventory`.
    async fn add_product(&self, input: &ProductInput) -> Result<InventoryItem, ClientError>;

    /// `PUT /api/inventory/{id}`.
    async fn update_product(
        &self,
        id: &str,
        input: &ProductInput,
    ) -> Result<InventoryItem, ClientError>;

    /// `DELETE /api/inventory/{id}`.
    async fn delete_product(&self, id: &str) -> Result<(), ClientError>;

    /// `GET /api/history`.
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ClientError>;
}

#[derive(Deserialize)]
struct LoginEnvelope {
    token: String,
    user: UserProfile,
}

#[derive(Deserialize)]
struct RegisterEnvelope {
    user: UserProfile,
}

#[derive(Deserialize)]
struct ProductEnvelope {
    product: InventoryItem,
}

#[derive(Deserialize)]
struct MessageEnvelope {
    message: String,
}

/// [`InventoryApi`] over HTTP.
#[derive(Debug)]
pub struct HttpInventoryApi {
    client: Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl HttpInventoryApi {
    /// Client for the backend at `base_url`, e.g. `http://localhost:5000`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when `base_url` is not an
    /// absolute hierarchical URL, and [`ClientError::Network`] when the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl {
            message: format!("{base_url:?}: {err}"),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                message: format!("{base_url:?} cannot carry a path"),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_transport_error)?;
        Ok(Self {
            client,
            base_url: parsed,
            token: RwLock::new(None),
        })
    }

    /// `{base}/api/{segments..}`; each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.client.request(method, self.endpoint(segments));
        let token = self
            .token
            .read()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |guard| guard.clone());
        match token {
            Some(bearer) => builder.bearer_auth(bearer),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        serde_json::from_slice(&body).map_err(|err| ClientError::Network {
            message: format!("unreadable response body: {err}"),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    debug!(error = %error, "inventory API request failed");
    ClientError::Network {
        message: error.to_string(),
    }
}

fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<MessageEnvelope>(body).map_or_else(
        |_| format!("request failed with status {}", status.as_u16()),
        |envelope| envelope.message,
    );
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let builder = self
            .request(Method::POST, &["auth", "login"])
            .json(&serde_json::json!({ "email": email, "password": password }));
        let envelope: LoginEnvelope = self.send(builder).await?;
        Ok(Session {
            token: envelope.token,
            user: envelope.user,
        })
    }

    async fn register(&self, account: &NewAccount) -> Result<UserProfile, ClientError> {
        let builder = self.request(Method::POST, &["auth", "register"]).json(account);
        let envelope: RegisterEnvelope = self.send(builder).await?;
        Ok(envelope.user)
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ClientError> {
        self.send(self.request(Method::GET, &["inventory"])).await
    }

    async fn add_product(&self, input: &ProductInput) -> Result<InventoryItem, ClientError> {
        let builder = self.request(Method::POST, &["inventory"]).json(input);
        let envelope: ProductEnvelope = self.send(builder).await?;
        Ok(envelope.product)
    }

    async fn update_product(
        &self,
        id: &str,
        input: &ProductInput,
    ) -> Result<InventoryItem, ClientError> {
        let builder = self
            .request(Method::PUT, &["inventory", id])
            .json(input);
        let envelope: ProductEnvelope = self.send(builder).await?;
        Ok(envelope.product)
    }

    async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        let builder = self.request(Method::DELETE, &["inventory", id]);
        let _confirmation: MessageEnvelope = self.send(builder).await?;
        Ok(())
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        self.send(self.request(Method::GET, &["history"])).await
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:5000", "http://localhost:5000/api/inventory")]
    #[case("http://localhost:5000/", "http://localhost:5000/api/inventory")]
    #[case("http://gateway.test/stock/", "http://gateway.test/stock/api/inventory")]
    fn endpoints_join_without_double_slash(#[case] base: &str, #[case] expected: &str) {
        let api = HttpInventoryApi::new(base, Duration::from_secs(1)).expect("client builds");
        assert_eq!(api.endpoint(&["inventory"]).as_str(), expected);
    }

    #[rstest]
    #[case("a/b", "http://localhost:5000/api/inventory/a%2Fb")]
    #[case("x?y", "http://localhost:5000/api/inventory/x%3Fy")]
    #[case("x#y", "http://localhost:5000/api/inventory/x%23y")]
    fn item_ids_stay_in_one_path_segment(#[case] id: &str, #[case] expected: &str) {
        let api = HttpInventoryApi::new("http://localhost:5000", Duration::from_secs(1))
            .expect("client builds");
        let url = api.endpoint(&["inventory", id]);
        assert_eq!(url.as_str(), expected);
        assert!(url.query().is_none() && url.fragment().is_none());
    }

    #[rstest]
    #[case("localhost:5000")]
    #[case("not a url")]
    fn unusable_base_urls_are_rejected(#[case] base: &str) {
        let err = HttpInventoryApi::new(base, Duration::from_secs(1)).expect_err("rejected");
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    fn api_errors_carry_server_message() {
        let body = br#"{"code":"conflict","message":"User already exists"}"#;
        assert_eq!(
            api_error(StatusCode::BAD_REQUEST, body),
            ClientError::Api {
                status: 400,
                message: "User already exists".to_owned(),
            }
        );
    }

    #[rstest]
    fn api_errors_fall_back_to_status() {
        let err = api_error(StatusCode::BAD_GATEWAY, b"<html>proxy error</html>");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "request failed with status 502");
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let api = HttpInventoryApi::new("http://127.0.0.1:9", Duration::from_millis(500))
            .expect("client builds");
        let err = api.list_inventory().await.expect_err("nothing listens on port 9");
        assert!(matches!(err, ClientError::Network { .. }));
    }
}

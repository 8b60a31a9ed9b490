//! Client-side application state.
//!
//! The store is a disposable view of server state. Every mutation goes to
//! the API first and is followed by a full re-fetch of both collections;
//! nothing is patched locally.

use tracing::{debug, warn};

use crate::api::InventoryApi;
use crate::error::ClientError;
use crate::model::{HistoryEntry, InventoryItem, NewAccount, ProductInput, UserProfile};

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    /// Signed-in user, if any.
    pub current_user: Option<UserProfile>,
    /// Session token from the last login.
    pub token: Option<String>,
    /// Inventory as of the last fetch.
    pub inventory: Vec<InventoryItem>,
    /// History as of the last fetch, newest first.
    pub history: Vec<HistoryEntry>,
    /// An API call is in flight.
    pub loading: bool,
}

enum Event {
    Started,
    Finished,
    SignedIn { token: String, user: UserProfile },
    Fetched {
        inventory: Vec<InventoryItem>,
        history: Vec<HistoryEntry>,
    },
    SignedOut,
}

fn reduce(state: &mut ClientState, event: Event) {
    match event {
        Event::Started => state.loading = true,
        Event::Finished => state.loading = false,
        Event::SignedIn { token, user } => {
            state.token = Some(token);
            state.current_user = Some(user);
        }
        Event::Fetched { inventory, history } => {
            state.inventory = inventory;
            state.history = history;
        }
        Event::SignedOut => *state = ClientState::default(),
    }
}

/// Typed store over an [`InventoryApi`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use inventory_client::{ClientStore, HttpInventoryApi, ProductInput};
///
/// # async fn demo() -> Result<(), inventory_client::ClientError> {
/// let api = HttpInventoryApi::new("http://localhost:5000", Duration::from_secs(10))?;
/// let mut store = ClientStore::new(api);
/// store.login("admin@test.com", "admin123").await?;
/// store
///     .add_product(&ProductInput {
///         name: "Zipper".to_owned(),
///         category: "Accessories".to_owned(),
///         quantity: 20,
///         price: 150.0,
///     })
///     .await?;
/// assert_eq!(store.state().history.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientStore<A> {
    api: A,
    state: ClientState,
}

impl<A: InventoryApi> ClientStore<A> {
    /// Empty, signed-out store.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ClientState::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ClientState {
        &self.state
    }

    /// Signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserProfile> {
        self.state.current_user.as_ref()
    }

    fn apply(&mut self, event: Event) {
        reduce(&mut self.state, event);
    }

    /// Sign in, then load inventory and history.
    ///
    /// # Errors
    ///
    /// Returns the login or fetch failure; on login failure the store stays
    /// signed out.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        self.apply(Event::Started);
        let result = self.login_and_fetch(email, password).await;
        self.apply(Event::Finished);
        result
    }

    async fn login_and_fetch(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let session = self.api.login(email, password).await?;
        self.api.set_token(Some(session.token.clone()));
        self.apply(Event::SignedIn {
            token: session.token,
            user: session.user,
        });
        self.fetch_all().await
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns the API failure, e.g. `User already exists`.
    pub async fn register(&mut self, account: &NewAccount) -> Result<UserProfile, ClientError> {
        self.apply(Event::Started);
        let result = self.api.register(account).await;
        self.apply(Event::Finished);
        result
    }

    /// Re-fetch inventory and history in full.
    ///
    /// # Errors
    ///
    /// Returns the first fetch failure; state is left unchanged.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.apply(Event::Started);
        let result = self.fetch_all().await;
        self.apply(Event::Finished);
        result
    }

    async fn fetch_all(&mut self) -> Result<(), ClientError> {
        let inventory = self.api.list_inventory().await?;
        let history = self.api.list_history().await?;
        debug!(
            items = inventory.len(),
            entries = history.len(),
            "client state refreshed"
        );
        self.apply(Event::Fetched { inventory, history });
        Ok(())
    }

    async fn mutate_then_fetch<T>(
        &mut self,
        outcome: Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        let value = outcome?;
        self.fetch_all().await?;
        Ok(value)
    }

    /// Add an item, then re-fetch both collections.
    ///
    /// # Errors
    ///
    /// Returns the API failure; nothing is fetched when the mutation fails.
    pub async fn add_product(&mut self, input: &ProductInput) -> Result<InventoryItem, ClientError> {
        self.apply(Event::Started);
        let outcome = self.api.add_product(input).await;
        let result = self.mutate_then_fetch(outcome).await;
        self.apply(Event::Finished);
        result
    }

    /// Replace an item, then re-fetch both collections.
    ///
    /// # Errors
    ///
    /// Returns the API failure, e.g. `Product not found`.
    pub async fn update_product(
        &mut self,
        id: &str,
        input: &ProductInput,
    ) -> Result<InventoryItem, ClientError> {
        self.apply(Event::Started);
        let outcome = self.api.update_product(id, input).await;
        let result = self.mutate_then_fetch(outcome).await;
        self.apply(Event::Finished);
        result
    }

    /// Delete an item, then re-fetch both collections.
    ///
    /// # Errors
    ///
    /// Returns the API failure, e.g. `Product not found`.
    pub async fn delete_product(&mut self, id: &str) -> Result<(), ClientError> {
        self.apply(Event::Started);
        let outcome = self.api.delete_product(id).await;
        let result = self.mutate_then_fetch(outcome).await;
        if let Err(err) = &result {
            warn!(error = %err, product_id = id, "delete failed");
        }
        self.apply(Event::Finished);
        result
    }

    /// Forget the session and every fetched collection.
    pub fn logout(&mut self) {
        self.api.set_token(None);
        self.apply(Event::SignedOut);
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    use super::*;
    use crate::api::MockInventoryApi;
    use crate::model::{HistoryAction, Session};
    use chrono::{TimeZone, Utc};
    use mockall::Sequence;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn admin() -> UserProfile {
        UserProfile {
            id: "5b1c7a86-7d5f-4a57-9f49-3a1c2f0d3c11".to_owned(),
            full_name: "Admin User".to_owned(),
            email: "admin@test.com".to_owned(),
            user_name: "admin".to_owned(),
            role: "admin".to_owned(),
        }
    }

    fn item(quantity: u32) -> InventoryItem {
        InventoryItem {
            id: "item-1".to_owned(),
            name: "Cotton Fabric".to_owned(),
            category: "Fabric".to_owned(),
            quantity,
            price: 4000.0,
        }
    }

    fn entry(action: HistoryAction, quantity: u32) -> HistoryEntry {
        HistoryEntry {
            id: format!("entry-{quantity}"),
            action,
            product: item(quantity),
            timestamp: Utc
                .with_ymd_and_hms(2026, 2, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    fn input(quantity: u32) -> ProductInput {
        ProductInput {
            name: "Cotton Fabric".to_owned(),
            category: "Fabric".to_owned(),
            quantity,
            price: 4000.0,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn login_stores_session_and_fetches_everything(admin: UserProfile) {
        let mut api = MockInventoryApi::new();
        let user = admin.clone();
        api.expect_login()
            .with(eq("admin@test.com"), eq("admin123"))
            .return_once(move |_, _| {
                Ok(Session {
                    token: "jwt".to_owned(),
                    user,
                })
            });
        api.expect_set_token()
            .with(eq(Some("jwt".to_owned())))
            .times(1)
            .return_const(());
        api.expect_list_inventory()
            .times(1)
            .return_once(|| Ok(vec![item(50)]));
        api.expect_list_history()
            .times(1)
            .return_once(|| Ok(vec![entry(HistoryAction::Added, 50)]));

        let mut store = ClientStore::new(api);
        store.login("admin@test.com", "admin123").await.expect("login");

        let state = store.state();
        assert_eq!(state.current_user.as_ref(), Some(&admin));
        assert_eq!(state.token.as_deref(), Some("jwt"));
        assert_eq!(state.inventory, vec![item(50)]);
        assert_eq!(state.history.len(), 1);
        assert!(!state.loading);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_login_leaves_store_signed_out() {
        let mut api = MockInventoryApi::new();
        api.expect_login().return_once(|_, _| {
            Err(ClientError::Api {
                status: 400,
                message: "Invalid credentials".to_owned(),
            })
        });
        api.expect_set_token().never();
        api.expect_list_inventory().never();

        let mut store = ClientStore::new(api);
        let err = store
            .login("admin@test.com", "wrong")
            .await
            .expect_err("login fails");
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(store.state(), &ClientState::default());
    }

    #[rstest]
    #[tokio::test]
    async fn each_mutation_refetches_both_collections() {
        let mut api = MockInventoryApi::new();
        let mut seq = Sequence::new();
        api.expect_update_product()
            .with(eq("item-1"), eq(input(45)))
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| Ok(item(45)));
        api.expect_list_inventory()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|| Ok(vec![item(45)]));
        api.expect_list_history()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|| {
                Ok(vec![
                    entry(HistoryAction::Updated, 45),
                    entry(HistoryAction::Added, 50),
                ])
            });

        let mut store = ClientStore::new(api);
        let updated = store
            .update_product("item-1", &input(45))
            .await
            .expect("update");
        assert_eq!(updated.quantity, 45);
        assert_eq!(store.state().inventory, vec![item(45)]);
        assert_eq!(
            store.state().history.first().map(|e| e.action),
            Some(HistoryAction::Updated)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn failed_mutation_skips_refetch() {
        let mut api = MockInventoryApi::new();
        api.expect_delete_product().return_once(|_| {
            Err(ClientError::Api {
                status: 404,
                message: "Product not found".to_owned(),
            })
        });
        api.expect_list_inventory().never();
        api.expect_list_history().never();

        let mut store = ClientStore::new(api);
        let err = store.delete_product("gone").await.expect_err("delete fails");
        assert_eq!(err.status(), Some(404));
        assert!(!store.state().loading);
    }

    #[rstest]
    #[tokio::test]
    async fn add_then_logout_clears_state() {
        let mut api = MockInventoryApi::new();
        api.expect_add_product()
            .return_once(|_| Ok(item(50)));
        api.expect_list_inventory()
            .return_once(|| Ok(vec![item(50)]));
        api.expect_list_history()
            .return_once(|| Ok(vec![entry(HistoryAction::Added, 50)]));
        api.expect_set_token()
            .with(eq(None::<String>))
            .times(1)
            .return_const(());

        let mut store = ClientStore::new(api);
        store.add_product(&input(50)).await.expect("add");
        assert_eq!(store.state().inventory.len(), 1);

        store.logout();
        assert_eq!(store.state(), &ClientState::default());
        assert!(store.current_user().is_none());
    }
}

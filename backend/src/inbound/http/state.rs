//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle through `actix_web::web::Data` and only see
//! driving ports, so they stay testable without storage or crypto.

use std::sync::Arc;

use crate::domain::ports::{
    HistoryQuery, InventoryCommand, InventoryQuery, LoginService, RegistrationService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub inventory: Arc<dyn InventoryCommand>,
    pub inventory_query: Arc<dyn InventoryQuery>,
    pub history: Arc<dyn HistoryQuery>,
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Build the bundle from one inventory service and one account service,
    /// each serving both of its driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use inventory_backend::domain::{AccountService, HistoryService, InventoryService};
    /// use inventory_backend::inbound::http::state::HttpState;
    /// use inventory_backend::outbound::memory::InMemoryStore;
    /// use inventory_backend::outbound::security::{BcryptPasswordHasher, JwtSessionTokenIssuer};
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let clock = Arc::new(DefaultClock);
    /// let tokens = JwtSessionTokenIssuer::with_random_secret(chrono::Duration::hours(24), clock.clone());
    /// let state = HttpState::from_services(
    ///     Arc::new(InventoryService::new(store.clone(), clock)),
    ///     Arc::new(HistoryService::new(store.clone())),
    ///     Arc::new(AccountService::new(
    ///         store,
    ///         Arc::new(BcryptPasswordHasher::default()),
    ///         Arc::new(tokens),
    ///     )),
    /// );
    /// let _history = state.history.clone();
    /// ```
    pub fn from_services<I, A>(
        inventory: Arc<I>,
        history: Arc<dyn HistoryQuery>,
        accounts: Arc<A>,
    ) -> Self
    where
        I: InventoryCommand + InventoryQuery + 'static,
        A: RegistrationService + LoginService + 'static,
    {
        Self {
            inventory: inventory.clone(),
            inventory_query: inventory,
            history,
            registration: accounts.clone(),
            login: accounts,
        }
    }
}

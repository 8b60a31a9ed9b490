//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;

use super::state_builders::{AccountSecurity, Storage};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) request_timeout: Duration,
    pub(crate) storage: Storage,
    pub(crate) security: AccountSecurity,
    pub(crate) clock: Arc<dyn Clock>,
}

impl ServerConfig {
    /// Construct a server configuration over an initialised store.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        storage: Storage,
        security: AccountSecurity,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bind_addr,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            storage,
            security,
            clock,
        }
    }

    /// Override how long a client may take to send request headers.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by the bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

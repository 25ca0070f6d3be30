//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use floofloo::settings::AppSettings;

/// Listener configuration for [`super::create_server`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a configuration binding to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Derive the listener configuration from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.bind_addr())
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

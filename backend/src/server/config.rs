//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use review_service::ServiceSettings;
use review_service::domain::StoreDeadline;
use review_service::settings::SettingsError;

/// Validated settings needed to wire and bind the server.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) max_reviewers: usize,
    pub(crate) store_deadline: StoreDeadline,
}

impl ServerConfig {
    /// Validate loaded settings.
    ///
    /// # Errors
    /// Propagates [`SettingsError`] for an unusable host or a zero timeout.
    pub fn from_settings(settings: &ServiceSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            max_reviewers: settings.max_reviewers(),
            store_deadline: settings.store_deadline()?,
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

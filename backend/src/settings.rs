//! Service configuration loaded via OrthoConfig.
//!
//! Values come from an optional configuration file, `REVIEW_*` environment
//! variables and CLI flags; later sources override earlier ones.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::StoreDeadline;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A zero store deadline would fail every store call.
    #[error("store_timeout_ms must be greater than zero")]
    ZeroStoreTimeout,
    /// The bind host is not an IP literal.
    #[error("invalid bind host {host:?}")]
    InvalidHost { host: String },
}

/// Runtime settings for the review service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REVIEW")]
pub struct ServiceSettings {
    /// Reviewers assigned when a pull request is opened.
    #[ortho_config(default = 2)]
    pub max_reviewers: usize,
    /// Address the HTTP listener binds to.
    pub host: Option<String>,
    /// Port the HTTP listener binds to.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Deadline for each store call, in milliseconds.
    #[ortho_config(default = 5000)]
    pub store_timeout_ms: u64,
}

impl ServiceSettings {
    /// Return the number of reviewers assigned on creation.
    pub fn max_reviewers(&self) -> usize {
        self.max_reviewers
    }

    /// Return the configured bind host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured bind port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Socket address built from [`Self::host`] and [`Self::port`].
    ///
    /// # Errors
    /// [`SettingsError::InvalidHost`] when the host is not an IP literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self
            .host()
            .parse()
            .map_err(|_| SettingsError::InvalidHost {
                host: self.host().to_owned(),
            })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Per-call store deadline.
    ///
    /// # Errors
    /// [`SettingsError::ZeroStoreTimeout`] when the timeout is zero.
    pub fn store_deadline(&self) -> Result<StoreDeadline, SettingsError> {
        match self.store_timeout_ms {
            0 => Err(SettingsError::ZeroStoreTimeout),
            millis => Ok(StoreDeadline::new(Duration::from_millis(millis))),
        }
    }
}

//! Shared HTTP client construction

use crate::error::{Error, Result};
use crate::types::ClientSettings;
use reqwest::Client;
use tracing::warn;

/// User agent sent with every request (GitHub rejects requests without one)
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build a client honouring the timeout and TLS settings
pub fn build_client(settings: &ClientSettings) -> Result<Client> {
    if settings.insecure {
        warn!("TLS certificate verification is disabled");
    }

    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(settings.timeout)
        .danger_accept_invalid_certs(settings.insecure)
        .build()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))
}

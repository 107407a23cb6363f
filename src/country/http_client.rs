//! Shared HTTP client construction policy for country data requests.
//!
//! Centralizes networking defaults (timeouts, user-agent, compression) so
//! every request to the country endpoint behaves the same way.

use std::time::Duration;

use reqwest::Client;

use crate::user_agent;

use super::CountryError;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Connect and read timeouts applied to the country client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// Builds the HTTP client used for country data.
///
/// # Errors
///
/// Returns [`CountryError::Client`] when client construction fails.
pub fn build_http_client(timeouts: HttpTimeouts) -> Result<Client, CountryError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
        .timeout(Duration::from_secs(timeouts.read_timeout_secs))
        .user_agent(user_agent::default_user_agent())
        .gzip(true)
        .build()
        .map_err(|e| CountryError::Client {
            reason: e.to_string(),
        })
}

//! Configuration module for the store client.
//!
//! The client never reads the environment on its own. Callers either build a
//! [`RestConfig`] directly or opt in to [`RestConfig::from_env`].

use std::env;
use std::time::Duration;

use crate::errors::StoreError;
use crate::models::Credentials;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/geoserver";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "geoserver";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoint and credentials of a GeoServer REST API.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// GeoServer base URL, e.g. `http://localhost:8080/geoserver`
    pub base_url: String,
    /// Basic-auth credentials sent with every request
    pub credentials: Credentials,
    /// Per-request timeout applied by the HTTP transport
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            credentials: Credentials::new(username, password),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables (and a `.env` file, if any).
    pub fn from_env() -> Result<Self, StoreError> {
        dotenvy::dotenv().ok();

        let base_url =
            env::var("GEOSERVER_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let username =
            env::var("GEOSERVER_USER").unwrap_or_else(|_| DEFAULT_USERNAME.to_string());

        let password =
            env::var("GEOSERVER_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());

        let timeout_secs = match env::var("GEOSERVER_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                StoreError::Config(format!("Invalid GEOSERVER_TIMEOUT_SECS value: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(&base_url, &username, &password)
            .with_timeout(Duration::from_secs(timeout_secs)))
    }
}

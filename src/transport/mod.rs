//! HTTP transport used by the store manager.
//!
//! The manager only needs four verbs. They sit behind [`RestTransport`] so
//! the manager can be driven by something other than a live server.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::Url;

use crate::config::RestConfig;
use crate::errors::StoreError;
use crate::models::Credentials;

/// Content type of every XML body sent to the server.
pub const XML_CONTENT_TYPE: &str = "text/xml";

/// One synchronous round trip per call. Implementations must be safe to
/// share between threads.
pub trait RestTransport: Send + Sync {
    /// GET a resource and return its body.
    fn get(&self, url: &Url, credentials: &Credentials) -> Result<String, StoreError>;

    /// POST an XML body and return the response body.
    fn post_xml(
        &self,
        url: &Url,
        body: &str,
        credentials: &Credentials,
    ) -> Result<String, StoreError>;

    /// PUT an XML body and return the response body.
    fn put_xml(
        &self,
        url: &Url,
        body: &str,
        credentials: &Credentials,
    ) -> Result<String, StoreError>;

    /// DELETE a resource.
    fn delete(&self, url: &Url, credentials: &Credentials) -> Result<(), StoreError>;
}

/// Blocking HTTP transport with basic authentication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &RestConfig) -> Result<Self, StoreError> {
        Self::new(config.timeout)
    }

    fn send(
        &self,
        request: RequestBuilder,
        credentials: &Credentials,
        accepted: &[StatusCode],
    ) -> Result<String, StoreError> {
        let response = request
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if accepted.contains(&status) {
            Ok(body)
        } else {
            tracing::debug!("Server answered {} with body: {}", status, body);
            Err(StoreError::Status {
                status: status.as_u16(),
                message: if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("unexpected status").to_string()
                } else {
                    body
                },
            })
        }
    }
}

const WRITE_ACCEPTED: [StatusCode; 3] = [StatusCode::OK, StatusCode::CREATED, StatusCode::ACCEPTED];

impl RestTransport for HttpTransport {
    fn get(&self, url: &Url, credentials: &Credentials) -> Result<String, StoreError> {
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url.clone()), credentials, &[StatusCode::OK])
    }

    fn post_xml(
        &self,
        url: &Url,
        body: &str,
        credentials: &Credentials,
    ) -> Result<String, StoreError> {
        tracing::debug!("POST {}", url);
        let request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(body.to_string());
        self.send(request, credentials, &WRITE_ACCEPTED)
    }

    fn put_xml(
        &self,
        url: &Url,
        body: &str,
        credentials: &Credentials,
    ) -> Result<String, StoreError> {
        tracing::debug!("PUT {}", url);
        let request = self
            .client
            .put(url.clone())
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(body.to_string());
        self.send(request, credentials, &WRITE_ACCEPTED)
    }

    fn delete(&self, url: &Url, credentials: &Credentials) -> Result<(), StoreError> {
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url.clone()), credentials, &[StatusCode::OK])
            .map(|_| ())
    }
}

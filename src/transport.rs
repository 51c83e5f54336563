//! HTTP transport collaborator.
//!
//! [`DatabaseContext`](crate::context::DatabaseContext) issues every request
//! through the [`HttpTransport`] trait, so tests substitute a stub and count
//! calls. [`ReqwestTransport`] is the production implementation: one blocking
//! client with a request timeout, basic auth when credentials are present,
//! and paths resolved against the properties bundle's base URL.
//!
//! A 404 response is surfaced as [`CouchError::NotFound`] so callers can
//! catch it specifically; other non-success statuses carry the status code
//! and body text. Response bodies are fully read before returning, so the
//! connection is always released.

use std::time::Duration;

use crate::config::DatabaseProperties;
use crate::error::{CouchError, Result};

/// Blocking request/response over server-relative paths.
///
/// Paths never start with a slash (`"orders"`, `"_all_dbs"`,
/// `"orders/_compact"`). Bodies and responses are JSON text.
pub trait HttpTransport: Send + Sync {
    fn get(&self, path: &str) -> Result<String>;
    fn put(&self, path: &str, body: &str) -> Result<String>;
    fn post(&self, path: &str, body: &str) -> Result<String>;
    fn delete(&self, path: &str) -> Result<String>;
}

/// Production transport over `reqwest::blocking`.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl ReqwestTransport {
    pub fn new(props: &DatabaseProperties) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(props.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: props.base_url(),
            username: props.username.clone(),
            password: props.password.clone(),
        })
    }

    fn execute(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&str>,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        if let Some(body) = body {
            // CouchDB requires the content type even for empty admin bodies
            // (_compact rejects the request with 415 otherwise).
            request = request
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let response = request.send()?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CouchError::NotFound(path.to_string()));
        }

        let text = response.text()?;
        if !status.is_success() {
            return Err(CouchError::Server {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, path: &str) -> Result<String> {
        self.execute(reqwest::Method::GET, path, None)
    }

    fn put(&self, path: &str, body: &str) -> Result<String> {
        self.execute(reqwest::Method::PUT, path, Some(body))
    }

    fn post(&self, path: &str, body: &str) -> Result<String> {
        self.execute(reqwest::Method::POST, path, Some(body))
    }

    fn delete(&self, path: &str) -> Result<String> {
        self.execute(reqwest::Method::DELETE, path, None)
    }
}

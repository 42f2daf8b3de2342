//! HTTP client for the homework review API
//!
//! One authenticated GET per poll cycle. The client returns the response
//! body as raw JSON; shape enforcement lives in [`crate::status`] so a
//! transport success with a surprising body is still visible to the caller
//! as a distinct validation failure.

use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use serde_json::Value;
use tracing::debug;

/// Client for the homework status endpoint
pub struct StatusClient {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl StatusClient {
    /// Create a client for the configured endpoint
    ///
    /// The underlying HTTP client carries an explicit bounded timeout so a
    /// stalled request cannot block future cycles.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &Config, credentials: &Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent("homework-notify")
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_token: credentials.api_token.clone(),
        })
    }

    /// Fetch homework statuses changed since `from_date`
    ///
    /// # Errors
    /// - [`Error::Transport`] on any transport-level failure
    /// - [`Error::UnexpectedStatus`] on a non-success HTTP status
    /// - [`Error::Decode`] if the body is not valid JSON
    pub async fn fetch(&self, from_date: i64) -> Result<Value> {
        debug!(from_date, "fetching homework statuses");

        let response = self
            .http
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.api_token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus(status.as_u16()));
        }

        // Decode from text so a malformed body surfaces as a Decode error,
        // not a transport error.
        let body = response.text().await?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    }
}

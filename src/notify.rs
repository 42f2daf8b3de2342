//! Telegram message delivery
//!
//! Delivery is best-effort and at-most-once: a failed send is logged and
//! dropped, never retried and never surfaced to the poll loop. The operator
//! sees the log line; the chat simply receives the next successful
//! notification whenever it occurs.

use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Delivers formatted status messages to a fixed Telegram chat
pub struct Notifier {
    http: reqwest::Client,
    send_url: String,
    chat_id: String,
}

impl Notifier {
    /// Create a notifier bound to the configured bot and chat
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &Config, credentials: &Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            send_url: format!(
                "{}/bot{}/sendMessage",
                config.telegram_api_base, credentials.bot_token
            ),
            chat_id: credentials.chat_id.clone(),
        })
    }

    /// Send one message to the configured chat
    ///
    /// # Errors
    /// - [`Error::Transport`] on any transport-level failure
    /// - [`Error::UnexpectedStatus`] if the Bot API answers non-success
    pub async fn send(&self, text: &str) -> Result<()> {
        let response = self
            .http
            .post(&self.send_url)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus(status.as_u16()));
        }
        Ok(())
    }

    /// Best-effort delivery: log the outcome and swallow any failure
    pub async fn notify(&self, text: &str) {
        match self.send(text).await {
            Ok(()) => debug!("notification delivered"),
            Err(e) => warn!(error = %e, "failed to deliver notification"),
        }
    }
}

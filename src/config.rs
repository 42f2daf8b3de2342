//! Configuration types for homework-notify

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Environment variable holding the review API token
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the Telegram chat identifier
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration for the poller
///
/// Everything here is a constant with a sensible default; the process is
/// configured entirely through environment variables (credentials) and these
/// defaults. There are no CLI flags and no config file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Homework status endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Base URL of the Telegram Bot API (default: "https://api.telegram.org")
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,

    /// Delay between poll cycles (default: 600 seconds)
    #[serde(default = "default_poll_interval")]
    pub poll_interval: Duration,

    /// Timeout applied to every outbound HTTP request (default: 30 seconds)
    ///
    /// Kept explicit and bounded so a stalled request cannot block all
    /// future cycles.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            telegram_api_base: default_telegram_api_base(),
            poll_interval: default_poll_interval(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(600)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

/// The three opaque secrets the poller needs before it can start
///
/// All of them must be present and non-empty; a missing credential is fatal
/// at startup, never mid-loop.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// OAuth token for the homework review API
    pub api_token: String,

    /// Telegram bot token
    pub bot_token: String,

    /// Identifier of the chat that receives notifications
    pub chat_id: String,
}

impl Credentials {
    /// Load credentials from the process environment and validate them
    ///
    /// # Errors
    /// Returns [`Error::MissingCredential`] naming the variable and the
    /// subsystem it serves if any of the three is absent or empty.
    pub fn from_env() -> Result<Self> {
        let credentials = Self {
            api_token: env::var(PRACTICUM_TOKEN_VAR).unwrap_or_default(),
            bot_token: env::var(TELEGRAM_TOKEN_VAR).unwrap_or_default(),
            chat_id: env::var(TELEGRAM_CHAT_ID_VAR).unwrap_or_default(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Check that every credential is present
    ///
    /// # Errors
    /// Returns [`Error::MissingCredential`] for the first absent credential.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (
                self.api_token.as_str(),
                PRACTICUM_TOKEN_VAR,
                "review API access",
            ),
            (
                self.bot_token.as_str(),
                TELEGRAM_TOKEN_VAR,
                "messaging connection",
            ),
            (self.chat_id.as_str(), TELEGRAM_CHAT_ID_VAR, "chat delivery"),
        ];

        for (value, name, subsystem) in checks {
            if value.is_empty() {
                return Err(Error::MissingCredential { name, subsystem });
            }
        }
        Ok(())
    }
}

//! The polling loop
//!
//! Orchestrates one fetch → validate → format → notify cycle per interval
//! and owns the only two pieces of mutable state in the process: the polling
//! cursor and the last notified message. Failures inside a cycle are logged
//! and abandon that cycle; the loop itself never exits on an error.

use crate::api::StatusClient;
use crate::config::{Config, Credentials};
use crate::error::Result;
use crate::notify::Notifier;
use crate::status::{parse_status, validate_response};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// Periodically polls the review API and relays status changes to the chat
pub struct Poller {
    client: StatusClient,
    notifier: Notifier,
    poll_interval: Duration,

    /// Lower bound of the next fetch window. Starts at 0 so the first cycle
    /// sees the full history; advanced from the server-echoed `current_date`.
    cursor: i64,

    /// Last message delivered to the chat. Sole deduplication mechanism,
    /// scoped to the process lifetime.
    last_message: Option<String>,
}

impl Poller {
    /// Create a poller from validated credentials
    ///
    /// # Errors
    /// Returns an error if either HTTP client cannot be created.
    pub fn new(config: &Config, credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            client: StatusClient::new(config, credentials)?,
            notifier: Notifier::new(config, credentials)?,
            poll_interval: config.poll_interval,
            cursor: 0,
            last_message: None,
        })
    }

    /// Current fetch-window lower bound
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run cycles forever, sleeping the configured interval between them
    ///
    /// The sleep runs after every cycle, successful, empty or failed, so the
    /// process can never spin against the API.
    pub async fn run(mut self) {
        info!(interval = ?self.poll_interval, "status poller started");
        loop {
            self.run_cycle().await;
            sleep(self.poll_interval).await;
        }
    }

    /// Run one fetch → validate → format → notify cycle
    ///
    /// Any failure is caught here, logged with context and abandons the
    /// cycle; nothing propagates to the caller.
    pub async fn run_cycle(&mut self) {
        match self.poll_once().await {
            Ok(Some(message)) => {
                if self.last_message.as_deref() == Some(message.as_str()) {
                    debug!("status unchanged, not notifying");
                } else {
                    self.notifier.notify(&message).await;
                    // At-most-once: recorded even if delivery failed, so a
                    // flaky chat never produces duplicate notifications.
                    self.last_message = Some(message);
                }
            }
            Ok(None) => debug!(cursor = self.cursor, "no homework in fetch window"),
            Err(e) => error!(error = %e, cursor = self.cursor, "poll cycle failed"),
        }
    }

    /// Fetch and interpret one response; `None` means an empty window
    async fn poll_once(&mut self) -> Result<Option<String>> {
        let response = self.client.fetch(self.cursor).await?;

        // Advance the window from the server clock when it is echoed back;
        // otherwise keep the old bound and accept an overlapping window.
        if let Some(current_date) = response.get("current_date").and_then(Value::as_i64) {
            self.cursor = current_date;
        }

        let homeworks = validate_response(&response)?;
        let Some(latest) = homeworks.first() else {
            return Ok(None);
        };
        let message = parse_status(latest)?;
        Ok(Some(message))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn poller_for(api: &MockServer, telegram: &MockServer) -> Poller {
        let config = Config {
            endpoint: format!("{}/homework_statuses/", api.uri()),
            telegram_api_base: telegram.uri(),
            ..Config::default()
        };
        let credentials = Credentials {
            api_token: "api-token".to_string(),
            bot_token: "bot-token".to_string(),
            chat_id: "12345".to_string(),
        };
        Poller::new(&config, &credentials).unwrap()
    }

    fn telegram_ok() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"ok": true}))
    }

    #[tokio::test]
    async fn cursor_starts_at_zero() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;
        let poller = poller_for(&api, &telegram).await;
        assert_eq!(poller.cursor(), 0);
    }

    #[tokio::test]
    async fn cycle_advances_cursor_from_current_date() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "homeworks": [],
                "current_date": 1000,
            })))
            .mount(&api)
            .await;

        let mut poller = poller_for(&api, &telegram).await;
        poller.run_cycle().await;
        assert_eq!(poller.cursor(), 1000);
    }

    #[tokio::test]
    async fn cycle_keeps_cursor_when_current_date_absent() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"homeworks": []})))
            .mount(&api)
            .await;

        let mut poller = poller_for(&api, &telegram).await;
        poller.run_cycle().await;
        assert_eq!(poller.cursor(), 0, "window may overlap rather than skip");
    }

    #[tokio::test]
    async fn cycle_selects_most_recent_record() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "homeworks": [
                    {"homework_name": "newest", "status": "approved"},
                    {"homework_name": "older", "status": "rejected"},
                ],
                "current_date": 2000,
            })))
            .mount(&api)
            .await;

        Mock::given(method("POST"))
            .and(path("/botbot-token/sendMessage"))
            .and(wiremock::matchers::body_partial_json(
                json!({"chat_id": "12345"}),
            ))
            .respond_with(telegram_ok())
            .expect(1)
            .mount(&telegram)
            .await;

        let mut poller = poller_for(&api, &telegram).await;
        poller.run_cycle().await;

        let requests = telegram.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let text = body["text"].as_str().unwrap();
        assert!(text.contains("newest"), "index 0 is the most recent record");
        assert!(!text.contains("older"));
    }

    #[tokio::test]
    async fn unknown_status_does_not_notify() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "homeworks": [{"homework_name": "hw1", "status": "weird"}],
            })))
            .mount(&api)
            .await;

        Mock::given(method("POST"))
            .respond_with(telegram_ok())
            .expect(0)
            .mount(&telegram)
            .await;

        let mut poller = poller_for(&api, &telegram).await;
        poller.run_cycle().await;
    }

    #[tokio::test]
    async fn fetch_failure_leaves_cursor_for_next_cycle() {
        let api = MockServer::start().await;
        let telegram = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("from_date", "0"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&api)
            .await;

        let mut poller = poller_for(&api, &telegram).await;
        poller.run_cycle().await;
        poller.run_cycle().await;
        assert_eq!(poller.cursor(), 0);
    }
}

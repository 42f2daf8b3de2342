//! Error types for homework-notify
//!
//! The taxonomy follows the failure tiers of the polling loop:
//! - Fatal (startup only): missing credentials
//! - Recoverable (per-cycle): transport, HTTP status, decode and shape failures
//! - Best-effort: notification delivery failures are swallowed by the
//!   notifier and never reach the loop as an `Error`

use thiserror::Error;

/// Result type alias for homework-notify operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for homework-notify
#[derive(Debug, Error)]
pub enum Error {
    /// A required credential is absent or empty
    #[error("missing credential {name} (required for {subsystem})")]
    MissingCredential {
        /// Environment variable that was expected to hold the credential
        name: &'static str,
        /// The subsystem the credential serves (e.g., "chat delivery")
        subsystem: &'static str,
    },

    /// Transport-level failure (timeout, connection refused, DNS, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success HTTP status
    #[error("unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    /// The response body was not valid JSON
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A JSON value did not have the expected shape
    #[error("malformed response: expected {expected} at {context}")]
    Shape {
        /// Where in the response the mismatch was found
        context: &'static str,
        /// The JSON type that was expected there
        expected: &'static str,
    },

    /// A required field is absent from the response
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A homework status outside the known verdict vocabulary
    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
}

impl Error {
    /// Returns true if the loop may continue after this error.
    ///
    /// Everything that can occur inside a poll cycle is recoverable; only a
    /// missing credential is fatal, and that is checked before the loop
    /// starts.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::MissingCredential { .. })
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_names_var_and_subsystem() {
        let err = Error::MissingCredential {
            name: "TELEGRAM_CHAT_ID",
            subsystem: "chat delivery",
        };
        let msg = err.to_string();
        assert!(msg.contains("TELEGRAM_CHAT_ID"));
        assert!(msg.contains("chat delivery"));
    }

    #[test]
    fn missing_credential_is_fatal() {
        let err = Error::MissingCredential {
            name: "PRACTICUM_TOKEN",
            subsystem: "review API access",
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn cycle_errors_are_recoverable() {
        let errors = vec![
            Error::UnexpectedStatus(503),
            Error::Decode(serde_json::from_str::<String>("not json").unwrap_err()),
            Error::Shape {
                context: "response",
                expected: "object",
            },
            Error::MissingField("homeworks"),
            Error::UnknownStatus("weird".to_string()),
        ];
        for err in errors {
            assert!(err.is_recoverable(), "{err} should not stop the loop");
        }
    }

    #[test]
    fn unexpected_status_carries_numeric_code() {
        let err = Error::UnexpectedStatus(503);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn shape_error_names_context_and_expectation() {
        let err = Error::Shape {
            context: "homeworks",
            expected: "array",
        };
        let msg = err.to_string();
        assert!(msg.contains("homeworks"));
        assert!(msg.contains("array"));
    }
}

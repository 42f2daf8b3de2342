//! # homework-notify
//!
//! Personal notification utility: polls a homework-review API on a fixed
//! interval and relays human-readable status changes to a single Telegram
//! chat.
//!
//! ## Design Philosophy
//!
//! - **Availability over correctness** - a bad API response abandons one
//!   cycle, never the process
//! - **Defensive validation** - the API response is untrusted JSON and is
//!   checked shape by shape
//! - **Environment-driven** - credentials come from the environment; there
//!   are no CLI flags and no state files
//!
//! ## Quick Start
//!
//! ```no_run
//! use homework_notify::{Config, Credentials, Poller, run_with_shutdown};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::from_env()?;
//!     let poller = Poller::new(&Config::default(), &credentials)?;
//!
//!     // Poll until SIGTERM/SIGINT
//!     run_with_shutdown(poller).await;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Review API client
pub mod api;
/// Configuration and credentials
pub mod config;
/// Error types
pub mod error;
/// Telegram delivery
pub mod notify;
/// The polling loop
pub mod poller;
/// Response validation and message formatting
pub mod status;

// Re-export commonly used types
pub use api::StatusClient;
pub use config::{Config, Credentials};
pub use error::{Error, Result};
pub use notify::Notifier;
pub use poller::Poller;
pub use status::{HomeworkRecord, parse_status, render_status, validate_response, verdict};

use tracing::info;

/// Run the poller until a termination signal arrives.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal
///   registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// The poller has no terminal state of its own; this wrapper is the only
/// way the process stops under normal operation.
pub async fn run_with_shutdown(poller: Poller) {
    tokio::select! {
        _ = poller.run() => {}
        _ = wait_for_signal() => {
            info!("shutting down");
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    info!("received SIGINT signal");
                }
            }
        }
        (Ok(mut sigterm), Err(_)) => {
            sigterm.recv().await;
            info!("received SIGTERM signal");
        }
        (Err(_), Ok(mut sigint)) => {
            sigint.recv().await;
            info!("received SIGINT signal");
        }
        (Err(_), Err(_)) => {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received Ctrl+C");
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C");
    }
}

//! Binary entrypoint: load credentials, build the poller, run until signaled.

use std::process::ExitCode;

use homework_notify::{Config, Credentials, Poller, run_with_shutdown};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // A .env file is optional; real environments set the variables directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "cannot start without credentials");
            return ExitCode::FAILURE;
        }
    };

    let config = Config::default();
    let poller = match Poller::new(&config, &credentials) {
        Ok(poller) => poller,
        Err(e) => {
            error!(error = %e, "failed to initialize HTTP clients");
            return ExitCode::FAILURE;
        }
    };

    run_with_shutdown(poller).await;
    ExitCode::SUCCESS
}

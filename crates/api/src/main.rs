#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Bubble Cleaner command-line client

use std::process::ExitCode;
use std::sync::Arc;

use bubblecleaner_api::cli::{self, Cli};
use bubblecleaner_api::{AppState, Config, TerminalNavigator};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    // Logs go to stderr so command output stays clean
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,bubblecleaner_api=info".into());
    let json_logs = std::env::var("BUBBLE_CLEANER_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let mut config = Config::from_env()?.with_access_token(args.token.clone());
    if let Some(api_url) = &args.api_url {
        config = config.with_api_url(api_url)?;
    }
    tracing::debug!(api_url = %config.api_base_url, "Configuration loaded");

    let state = AppState::new(config, Arc::new(TerminalNavigator))?;

    match cli::run(args.command, &state).await {
        Ok(code) => Ok(code),
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

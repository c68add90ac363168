//! BCA CLI
//!
//! Command-line client for the BCA compliance assistant: sign in, ask the
//! assistant, upload documents for extraction and follow the resulting job,
//! generate summaries, and turn statement images into spreadsheets.

mod commands;
mod config;
mod session_store;
mod upload;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bca")]
#[command(about = "BCA compliance assistant CLI", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "BCA_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Seconds between job status checks
    #[arg(long, env = "BCA_POLL_INTERVAL", default_value_t = 5)]
    poll_interval: u64,

    /// Per-request timeout in seconds (unset: no timeout)
    #[arg(long, env = "BCA_REQUEST_TIMEOUT")]
    request_timeout: Option<u64>,

    /// Where the signed-in session is stored
    #[arg(long, env = "BCA_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bca_cli=warn,bca_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        poll_interval: Duration::from_secs(cli.poll_interval),
        request_timeout: cli.request_timeout.map(Duration::from_secs),
        session_file: cli
            .session_file
            .unwrap_or_else(config::default_session_file),
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}

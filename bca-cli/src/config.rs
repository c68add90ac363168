//! Configuration module
//!
//! Handles CLI configuration: backend URL, polling interval, request timeout
//! and where the signed-in session is kept.

use anyhow::{Context, Result};
use bca_client::BcaClient;
use std::path::PathBuf;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend
    pub api_url: String,

    /// How often to check the status of an extraction job
    pub poll_interval: Duration,

    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,

    /// File holding the signed-in session
    pub session_file: PathBuf,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds the backend client
    pub fn client(&self) -> Result<BcaClient> {
        match self.request_timeout {
            Some(timeout) => BcaClient::with_timeout(&self.api_url, timeout)
                .context("Failed to build HTTP client"),
            None => Ok(BcaClient::new(&self.api_url)),
        }
    }
}

/// Default location of the session file
///
/// Uses the platform config directory, falling back to the working directory.
pub fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("bca").join("session.json"))
        .unwrap_or_else(|| PathBuf::from(".bca-session.json"))
}

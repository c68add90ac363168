//! BCA HTTP Client
//!
//! A small, type-safe HTTP client for the BCA compliance assistant backend.
//!
//! The command-line front end talks to the backend exclusively through this
//! crate. The document upload and status calls are also exposed through the
//! [`DocumentApi`] trait so the upload coordinator can run against a fake.
//!
//! # Example
//!
//! ```no_run
//! use bca_client::BcaClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BcaClient::new("http://localhost:8000");
//!
//!     let answer = client.ask("abc123", "What is the CTR threshold?").await?;
//!     println!("{}", answer.unwrap_or_default());
//!     Ok(())
//! }
//! ```

mod api;
mod auth;
mod chat;
mod documents;
pub mod error;
mod images;
mod summary;

// Re-export commonly used types
pub use api::DocumentApi;
pub use error::{ClientError, Result};
pub use images::{Spreadsheet, filename_from_disposition};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Header carrying the acting user on upload requests
pub const ACTOR_HEADER: &str = "X-User-Name";

/// HTTP client for the BCA backend API
///
/// Methods are grouped by backend area:
/// - Authentication (login)
/// - Chat queries
/// - Document upload and job status
/// - Summary generation
/// - Financial statement extraction from images
#[derive(Debug, Clone)]
pub struct BcaClient {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl BcaClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend API (e.g., "http://localhost:8000")
    ///
    /// # Example
    /// ```
    /// use bca_client::BcaClient;
    ///
    /// let client = BcaClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use bca_client::BcaClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BcaClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a relative path onto the base URL
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Fails with [`ClientError::ApiError`] on a non-2xx status
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        self.check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body may or may not be JSON
    async fn handle_text_response(&self, response: reqwest::Response) -> Result<String> {
        Ok(self.check_status(response).await?.text().await?)
    }
}

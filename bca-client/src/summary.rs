//! Summary generation endpoint

use crate::BcaClient;
use crate::error::{ClientError, Result};
use bca_core::domain::summary::SummaryRequest;
use bca_core::dto::summary::SummaryEnvelope;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

/// Raised when the summary endpoint answers without the expected text
pub const MISSING_SUMMARY: &str = r#"Server returned JSON without a "summary.summary" field."#;

impl BcaClient {
    // =============================================================================
    // Summaries
    // =============================================================================

    /// Generate a compliance summary for a company and year
    ///
    /// # Arguments
    /// * `request` - Validated company and year
    ///
    /// # Returns
    /// The summary text (markdown)
    pub async fn generate_summary(&self, request: &SummaryRequest) -> Result<String> {
        let url = self.url("summary");
        debug!(
            "Requesting summary for {} ({})",
            request.company(),
            request.year()
        );

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&request.to_query())
            .send()
            .await?;

        let body: Value = self.handle_response(response).await?;
        summary_text(body)
    }
}

fn summary_text(body: Value) -> Result<String> {
    serde_json::from_value::<SummaryEnvelope>(body)
        .ok()
        .and_then(SummaryEnvelope::into_text)
        .ok_or_else(|| ClientError::ParseError(MISSING_SUMMARY.to_string()))
}

//! Chat query endpoint

use crate::BcaClient;
use crate::error::Result;
use bca_core::domain::chat::reply_text;
use bca_core::dto::chat::ChatQuery;
use serde_json::Value;
use tracing::debug;

impl BcaClient {
    // =============================================================================
    // Chat
    // =============================================================================

    /// Ask the assistant a question
    ///
    /// # Arguments
    /// * `session_id` - Conversation identifier, reused for follow-up questions
    /// * `question` - The user's question
    ///
    /// # Returns
    /// The answer text, or `None` when the backend answered with nothing usable
    pub async fn ask(&self, session_id: &str, question: &str) -> Result<Option<String>> {
        let url = self.url("query");
        debug!("Sending question for session {}", session_id);

        let response = self
            .client
            .post(&url)
            .json(&ChatQuery {
                session_id: session_id.to_string(),
                question: question.to_string(),
            })
            .send()
            .await?;

        let body = self.handle_text_response(response).await?;
        Ok(answer_from_body(&body))
    }
}

/// Answers may arrive as JSON or as plain text
fn answer_from_body(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => reply_text(&value),
        Err(_) => Some(body.to_string()),
    }
    .filter(|text| !text.trim().is_empty())
}

//! Chat query DTOs

use serde::{Deserialize, Serialize};

/// A question posted to the query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatQuery {
    /// Conversation identifier, stable for the lifetime of one conversation
    pub session_id: String,
    pub question: String,
}

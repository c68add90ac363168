//! Chat domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Shown when the backend answers with nothing usable
pub const NO_ANSWER_REPLY: &str = "I'm sorry, I couldn't find an answer.";

/// Shown when the query request itself fails
pub const FAILED_QUERY_REPLY: &str = "Sorry, something went wrong. Please try again later.";

const SESSION_ID_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One bubble in the transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// A conversation with the assistant
///
/// The session id is generated once and sent with every question so the
/// backend can keep context between turns.
#[derive(Debug, Clone)]
pub struct Conversation {
    session_id: String,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::with_session_id(new_session_id())
    }

    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            messages: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Records a question; blank input is ignored and yields `None`
    pub fn push_user(&mut self, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.push(Sender::User, text.to_string()))
    }

    /// Records an answer, substituting [`NO_ANSWER_REPLY`] for a blank one
    pub fn push_bot(&mut self, text: Option<String>) -> &ChatMessage {
        let text = text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| NO_ANSWER_REPLY.to_string());
        self.push(Sender::Bot, text)
    }

    /// Records the apology shown when a query fails
    pub fn push_failure(&mut self) -> &ChatMessage {
        self.push(Sender::Bot, FAILED_QUERY_REPLY.to_string())
    }

    fn push(&mut self, sender: Sender, text: String) -> &ChatMessage {
        let prefix = match sender {
            Sender::User => "user",
            Sender::Bot => "bot",
        };
        let message = ChatMessage {
            id: format!("{}-{}", prefix, self.messages.len()),
            text,
            sender,
            timestamp: Utc::now(),
        };
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Short lowercase alphanumeric conversation id
pub fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()[..SESSION_ID_LEN].to_string()
}

/// Pulls the answer text out of a query response body
///
/// The backend usually answers with a bare string. Objects are searched for
/// an `answer`, `response` or `message` field.
pub fn reply_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => ["answer", "response", "message"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

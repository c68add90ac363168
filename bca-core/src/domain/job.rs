//! Job domain types
//!
//! The status endpoint answers either with a bare string or with a small
//! object. [`JobStatusPayload`] normalizes both into a display label and an
//! optional result message, and decides whether the job has finished.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token whose presence in a status label marks the job as finished
pub const COMPLETED_TOKEN: &str = "completed";

/// Opaque job identifier assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Case-insensitive substring test for [`COMPLETED_TOKEN`]
pub fn is_terminal_status(status: &str) -> bool {
    status.to_lowercase().contains(COMPLETED_TOKEN)
}

/// Uppercases the first character, leaving the rest untouched
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A status response, normalized by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatusPayload {
    /// The whole body is the status
    Text(String),
    /// `{ status?, result?: { message? } }`
    Structured {
        status: Option<String>,
        result_message: Option<String>,
    },
    /// Anything else; yields no label, no message, never terminal
    Unrecognized,
}

impl JobStatusPayload {
    /// Normalizes a decoded JSON body
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) if !s.is_empty() => Self::Text(s.clone()),
            Value::Object(map) => Self::Structured {
                status: map
                    .get("status")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                result_message: map
                    .get("result")
                    .and_then(|r| r.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            _ => Self::Unrecognized,
        }
    }

    /// Normalizes a raw response body
    ///
    /// Bodies that are not valid JSON are treated as a plain-text status.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_json(&value),
            Err(_) => {
                let text = body.trim();
                if text.is_empty() {
                    Self::Unrecognized
                } else {
                    Self::Text(text.to_string())
                }
            }
        }
    }

    /// Raw status text as sent by the backend
    pub fn raw_status(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Structured { status, .. } => status.as_deref(),
            Self::Unrecognized => None,
        }
    }

    /// Status with its first letter capitalized, absent when empty or missing
    pub fn status_label(&self) -> Option<String> {
        self.raw_status()
            .filter(|s| !s.is_empty())
            .map(capitalize_first)
    }

    pub fn result_message(&self) -> Option<String> {
        match self {
            Self::Structured { result_message, .. } => result_message.clone(),
            _ => None,
        }
    }

    /// Whether polling should stop
    pub fn is_terminal(&self) -> bool {
        self.raw_status().is_some_and(is_terminal_status)
    }
}

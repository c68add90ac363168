//! Summary generation DTOs

use serde::{Deserialize, Serialize};

/// Request body for the summary endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryQuery {
    pub company: String,
    /// Annual information return year
    pub year: String,
}

/// `{ summary: { summary: "..." } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryEnvelope {
    #[serde(default)]
    pub summary: Option<SummaryBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryBody {
    #[serde(default)]
    pub summary: Option<String>,
}

impl SummaryEnvelope {
    /// The summary text, absent when missing or blank
    pub fn into_text(self) -> Option<String> {
        self.summary
            .and_then(|body| body.summary)
            .filter(|text| !text.trim().is_empty())
    }
}

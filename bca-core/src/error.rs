//! Local validation errors
//!
//! These never reach the network layer; they are raised while screening user
//! input before a request is built.

use thiserror::Error;

/// Input rejected before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing was selected for submission
    #[error("No documents selected.")]
    EmptyBatch,

    /// Every candidate document had a disallowed extension
    #[error("Only Word, Excel, or PDF documents are allowed.")]
    NoAllowedFiles {
        /// Names of the files that were dropped
        rejected: Vec<String>,
    },

    /// Every candidate for financial extraction was something other than an image
    #[error("Please select valid image files.")]
    NoImageFiles {
        /// Names of the files that were dropped
        rejected: Vec<String>,
    },

    /// Login form errors, one message per offending field
    #[error("{}", .0.join(" "))]
    Credentials(Vec<String>),

    /// Summary request missing the company or the year
    #[error("Please provide both the company name and AIR to generate a summary.")]
    IncompleteSummaryRequest,
}

impl ValidationError {
    /// Names of files dropped during screening, if this error carries any
    pub fn rejected_files(&self) -> &[String] {
        match self {
            Self::NoAllowedFiles { rejected } | Self::NoImageFiles { rejected } => rejected,
            _ => &[],
        }
    }
}

/// Build the notice listing files that were skipped during screening
///
/// Returns `None` when nothing was skipped.
pub fn skipped_files_notice(rejected: &[String]) -> Option<String> {
    if rejected.is_empty() {
        None
    } else {
        Some(format!("Unsupported files skipped: {}", rejected.join(", ")))
    }
}

//! Summary report requests

use crate::dto::summary::SummaryQuery;
use crate::error::ValidationError;

const DEFAULT_REPORT_NAME: &str = "summary-report";

/// Extension of the saved report
pub const REPORT_EXTENSION: &str = "md";

/// Characters that cannot appear in a file name on common filesystems
const FORBIDDEN_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// A validated request for a company summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    company: String,
    year: String,
}

impl SummaryRequest {
    /// Trims both fields; both must be non-empty afterwards
    pub fn new(company: &str, year: &str) -> Result<Self, ValidationError> {
        let company = company.trim();
        let year = year.trim();

        if company.is_empty() || year.is_empty() {
            return Err(ValidationError::IncompleteSummaryRequest);
        }

        Ok(Self {
            company: company.to_string(),
            year: year.to_string(),
        })
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn to_query(&self) -> SummaryQuery {
        SummaryQuery {
            company: self.company.clone(),
            year: self.year.clone(),
        }
    }

    /// File name the report is saved under
    pub fn file_name(&self) -> String {
        ensure_extension(
            &sanitize_file_name(&fallback_file_name(&self.company, &self.year)),
            REPORT_EXTENSION,
        )
    }
}

/// `<company>-summary`, else `<year>-summary`, else `summary-report`
pub fn fallback_file_name(company: &str, year: &str) -> String {
    if !company.is_empty() {
        format!("{}-summary", company)
    } else if !year.is_empty() {
        format!("{}-summary", year)
    } else {
        DEFAULT_REPORT_NAME.to_string()
    }
}

/// Strips forbidden characters and collapses whitespace runs into `-`
pub fn sanitize_file_name(value: &str) -> String {
    let stripped: String = value
        .trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect();
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join("-");

    if cleaned.is_empty() {
        DEFAULT_REPORT_NAME.to_string()
    } else {
        cleaned
    }
}

/// Appends `.ext` unless the name already ends with it (case-insensitive)
pub fn ensure_extension(file_name: &str, ext: &str) -> String {
    let suffix = format!(".{}", ext.to_lowercase());
    if file_name.to_lowercase().ends_with(&suffix) {
        file_name.to_string()
    } else {
        format!("{}{}", file_name, suffix)
    }
}

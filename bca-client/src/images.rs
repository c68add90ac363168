//! Financial statement extraction endpoint

use crate::BcaClient;
use crate::documents::multipart_form;
use crate::error::{ClientError, Result};
use bca_core::domain::document::DocumentFile;
use bca_core::domain::image::DEFAULT_SPREADSHEET_NAME;
use regex::Regex;
use reqwest::header::CONTENT_DISPOSITION;
use std::sync::OnceLock;
use tracing::debug;

/// A spreadsheet generated from uploaded images
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    /// Name suggested by the backend, or the default
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl BcaClient {
    // =============================================================================
    // Financial Extraction
    // =============================================================================

    /// Extract financial figures from statement images into a spreadsheet
    ///
    /// # Arguments
    /// * `images` - Image files, already screened
    ///
    /// # Returns
    /// The generated spreadsheet bytes and its file name
    pub async fn extract_financials(&self, images: &[DocumentFile]) -> Result<Spreadsheet> {
        if images.is_empty() {
            return Err(ClientError::InvalidRequest(
                "at least one image is required".to_string(),
            ));
        }

        let url = self.url("extract-financials");
        let form = multipart_form(images).await?;
        debug!("Uploading {} image(s) for extraction", images.len());

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = self.check_status(response).await?;

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| DEFAULT_SPREADSHEET_NAME.to_string());
        let bytes = response.bytes().await?.to_vec();

        Ok(Spreadsheet { file_name, bytes })
    }
}

fn disposition_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)filename\*?=(?:UTF-8''|")?([^;"\n]+)"?"#)
            .expect("disposition pattern is valid")
    })
}

/// Extracts the file name from a `Content-Disposition` header value
///
/// Percent-encoded names are decoded; a name that fails to decode is
/// returned as sent.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let raw = disposition_pattern().captures(header)?.get(1)?.as_str();

    match urlencoding::decode(raw) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => Some(raw.to_string()),
    }
}

//! Document upload and job status endpoints

use crate::error::{ClientError, Result};
use crate::{ACTOR_HEADER, BcaClient};
use bca_core::domain::document::DocumentFile;
use bca_core::domain::job::{JobId, JobStatusPayload};
use bca_core::dto::document::UploadReceipt;
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// Multipart field name used for every attached file
pub(crate) const FILES_FIELD: &str = "files";

impl BcaClient {
    // =============================================================================
    // Document Extraction
    // =============================================================================

    /// Upload documents for extraction
    ///
    /// # Arguments
    /// * `files` - Documents to attach, in order
    /// * `actor` - Name of the user submitting them
    ///
    /// # Returns
    /// The upload receipt; a `job_id` in it means progress can be polled
    pub async fn upload_documents(&self, files: &[DocumentFile], actor: &str) -> Result<UploadReceipt> {
        if files.is_empty() {
            return Err(ClientError::InvalidRequest(
                "at least one document is required".to_string(),
            ));
        }

        let url = self.url("documents/upload");
        let form = multipart_form(files).await?;
        debug!("Uploading {} document(s) as {}", files.len(), actor);

        let response = self
            .client
            .post(&url)
            .header(ACTOR_HEADER, actor)
            .multipart(form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the current status of an extraction job
    ///
    /// # Arguments
    /// * `job_id` - Identifier from an upload receipt
    ///
    /// # Returns
    /// The normalized status payload
    pub async fn job_status(&self, job_id: &JobId) -> Result<JobStatusPayload> {
        let url = self.url(&format!(
            "documents/status/{}",
            urlencoding::encode(job_id.as_str())
        ));
        let response = self.client.get(&url).send().await?;

        let body = self.handle_text_response(response).await?;
        Ok(JobStatusPayload::from_body(&body))
    }
}

/// Reads every file from disk into a `files` part
pub(crate) async fn multipart_form(files: &[DocumentFile]) -> Result<Form> {
    let mut form = Form::new();

    for file in files {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|source| ClientError::Io {
                path: file.path.display().to_string(),
                source,
            })?;
        form = form.part(FILES_FIELD, Part::bytes(bytes).file_name(file.name.clone()));
    }

    Ok(form)
}

//! Document API seam
//!
//! The upload coordinator only needs two calls. Keeping them behind a trait
//! lets it run against an in-memory fake in tests.

use async_trait::async_trait;
use bca_core::domain::document::DocumentFile;
use bca_core::domain::job::{JobId, JobStatusPayload};
use bca_core::dto::document::UploadReceipt;

use crate::BcaClient;
use crate::error::Result;

/// Remote document extraction service
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// Submit documents on behalf of `actor`
    async fn upload(&self, files: &[DocumentFile], actor: &str) -> Result<UploadReceipt>;

    /// Fetch the current status of a job
    async fn status(&self, job_id: &JobId) -> Result<JobStatusPayload>;
}

#[async_trait]
impl DocumentApi for BcaClient {
    async fn upload(&self, files: &[DocumentFile], actor: &str) -> Result<UploadReceipt> {
        self.upload_documents(files, actor).await
    }

    async fn status(&self, job_id: &JobId) -> Result<JobStatusPayload> {
        self.job_status(job_id).await
    }
}

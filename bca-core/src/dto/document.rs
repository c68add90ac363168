//! Document upload DTOs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::job::JobId;

/// Body returned by the upload endpoint
///
/// Both fields are optional; a receipt without a `job_id` means the backend
/// will not report progress for this upload. Fields that are not non-empty
/// strings decode as absent, so an accepted upload is never reported as a
/// failed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "non_empty_job_id")]
    pub job_id: Option<JobId>,
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn non_empty_job_id<'de, D>(deserializer: D) -> Result<Option<JobId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_empty_string(deserializer)?.map(JobId::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_receipt_optional_fields() {
        let receipt: UploadReceipt = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(receipt.message.as_deref(), Some("ok"));
        assert!(receipt.job_id.is_none());

        let receipt: UploadReceipt =
            serde_json::from_str(r#"{"message":"ok","job_id":"J1"}"#).unwrap();
        assert_eq!(receipt.job_id, Some(JobId::new("J1")));

        let receipt: UploadReceipt = serde_json::from_str("{}").unwrap();
        assert_eq!(receipt, UploadReceipt::default());
    }

    #[test]
    fn test_upload_receipt_ignores_unusable_job_ids() {
        let receipt: UploadReceipt =
            serde_json::from_str(r#"{"message":"ok","job_id":42}"#).unwrap();
        assert_eq!(receipt.message.as_deref(), Some("ok"));
        assert!(receipt.job_id.is_none());

        let receipt: UploadReceipt = serde_json::from_str(r#"{"job_id":""}"#).unwrap();
        assert!(receipt.job_id.is_none());

        let receipt: UploadReceipt =
            serde_json::from_str(r#"{"message":null,"job_id":{"id":"J1"}}"#).unwrap();
        assert_eq!(receipt, UploadReceipt::default());
    }
}

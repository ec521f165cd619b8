//! Submission boundary for completed applications.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::model::ApplicantProfile;
use crate::error::SubmissionError;

/// Acknowledgement for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
        }
    }
}

impl Default for SubmissionReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives the full profile once per applicant-initiated submit.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, profile: &ApplicantProfile) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Sink that writes the application payload to the log and accepts it.
#[derive(Debug, Default, Clone)]
pub struct LogSubmission;

#[async_trait]
impl SubmissionSink for LogSubmission {
    async fn submit(&self, profile: &ApplicantProfile) -> Result<SubmissionReceipt, SubmissionError> {
        let payload = serde_json::to_string(profile)?;
        let receipt = SubmissionReceipt::new();
        tracing::info!(
            submission_id = %receipt.id,
            email = %profile.personal_info.email,
            payload = %payload,
            "Application submitted"
        );
        Ok(receipt)
    }
}

// crates/core/src/job.rs
//! Job and record domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::JobStatus;

/// A single extraction task tracked by the job store.
///
/// All timestamps are unix seconds (UTC). `end_time` is set only by a
/// terminal transition, `error_message` only when the job failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionJob {
    pub job_id: Uuid,
    pub connection_id: Uuid,
    pub status: JobStatus,
    pub record_count: i64,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub error_message: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One extracted row, owned by exactly one job.
///
/// Rows are written only under an `in_progress` job (atomically with the
/// completing transition) and destroyed only by job removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub id: i64,
    pub job_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub id_from_service: String,
    pub created_at: i64,
}

/// Contact payload as produced by the extraction adapter.
///
/// This is also the wire shape of a record in result pages: the owning job
/// and row bookkeeping stay server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContact {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub id_from_service: String,
}

impl From<ExtractionRecord> for ExtractedContact {
    fn from(record: ExtractionRecord) -> Self {
        Self {
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            id_from_service: record.id_from_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_serializes_status_spelling_and_skips_nothing() {
        let job = ExtractionJob {
            job_id: Uuid::nil(),
            connection_id: Uuid::nil(),
            status: JobStatus::InProgress,
            record_count: 0,
            start_time: 1_700_000_000,
            end_time: None,
            error_message: None,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        };
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["status"], "in_progress");
        // Nullable fields stay present so clients can rely on the shape.
        assert!(json["end_time"].is_null());
        assert!(json["error_message"].is_null());
    }

    #[test]
    fn test_record_payload_projection() {
        let record = ExtractionRecord {
            id: 7,
            job_id: Uuid::nil(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            id_from_service: "hs-1".to_string(),
            created_at: 0,
        };
        let contact: ExtractedContact = record.into();
        assert_eq!(contact.email, "ada@example.com");
        assert_eq!(contact.id_from_service, "hs-1");
    }
}

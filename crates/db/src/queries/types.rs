// crates/db/src/queries/types.rs
//! Store-level operation outcomes and query parameters.

use datalift_core::{ExtractionJob, ExtractionRecord, JobStatus};

/// Outcome of a cancel request against the store.
///
/// The three cases map 1:1 to the API's 200 / 409 / 404 responses. A second
/// cancel of an already-cancelled job is `AlreadyTerminal`, never a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    Cancelled(ExtractionJob),
    AlreadyTerminal(JobStatus),
    NotFound,
}

/// Outcome of a remove request against the store.
///
/// Removal is only permitted on terminal jobs; a live job must be cancelled
/// first (see DESIGN.md for the policy rationale).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotRemovable(JobStatus),
    NotFound,
}

/// Filter and page bounds for job listings.
#[derive(Debug, Clone, Copy)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for JobFilter {
    fn default() -> Self {
        Self {
            status: None,
            limit: 10,
            offset: 0,
        }
    }
}

/// One page of jobs plus the unfiltered total for the same filter.
#[derive(Debug, Clone)]
pub struct JobPage {
    pub jobs: Vec<ExtractionJob>,
    pub total: i64,
}

/// One page of records plus the owning job's total.
#[derive(Debug, Clone)]
pub struct RecordPage {
    pub records: Vec<ExtractionRecord>,
    pub total: i64,
}

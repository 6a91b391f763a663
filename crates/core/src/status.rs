// crates/core/src/status.rs
//! Job status vocabulary and the legal-transition table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;

/// Status of an extraction job.
///
/// A job is created `Pending`, picked up as `InProgress`, and ends in exactly
/// one of the three terminal statuses. Terminal jobs admit no further
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Pending,
        JobStatus::InProgress,
        JobStatus::Completed,
        JobStatus::Failed,
        JobStatus::Cancelled,
    ];

    /// Whether this status admits no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// The wire/database spelling of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LifecycleError::UnknownStatus(s.to_string()))
    }
}

/// An event that moves a job between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobEvent {
    /// Extraction picked the job up.
    Begin,
    /// Extraction produced its records.
    Succeed,
    /// Extraction reported an error.
    Fail,
    /// A user asked for the job to stop.
    Cancel,
}

impl JobEvent {
    /// Statuses the event may legally fire from.
    ///
    /// The store turns these sets into `WHERE status IN (...)` guards, so a
    /// transition that lost a race observes zero affected rows instead of
    /// clobbering the winner.
    pub fn legal_sources(self) -> &'static [JobStatus] {
        match self {
            JobEvent::Begin => &[JobStatus::Pending],
            JobEvent::Succeed => &[JobStatus::InProgress],
            JobEvent::Fail => &[JobStatus::InProgress],
            JobEvent::Cancel => &[JobStatus::Pending, JobStatus::InProgress],
        }
    }

    /// Status the event lands in.
    pub fn target(self) -> JobStatus {
        match self {
            JobEvent::Begin => JobStatus::InProgress,
            JobEvent::Succeed => JobStatus::Completed,
            JobEvent::Fail => JobStatus::Failed,
            JobEvent::Cancel => JobStatus::Cancelled,
        }
    }
}

impl fmt::Display for JobEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JobEvent::Begin => "begin",
            JobEvent::Succeed => "complete",
            JobEvent::Fail => "fail",
            JobEvent::Cancel => "cancel",
        })
    }
}

/// Validate a single transition, returning the destination status.
pub fn apply(from: JobStatus, event: JobEvent) -> Result<JobStatus, LifecycleError> {
    if event.legal_sources().contains(&from) {
        Ok(event.target())
    } else {
        Err(LifecycleError::InvalidTransition { from, event })
    }
}

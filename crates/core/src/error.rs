// crates/core/src/error.rs

use thiserror::Error;

use crate::status::{JobEvent, JobStatus};

/// Violations of the job lifecycle rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// The requested event is not legal from the job's current status.
    #[error("cannot {event} job with status: {from}")]
    InvalidTransition { from: JobStatus, event: JobEvent },

    /// A status string from outside the engine did not parse.
    #[error("unknown job status: {0}")]
    UnknownStatus(String),
}

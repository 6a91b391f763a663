// crates/client/src/lib.rs
//! Harness-side client for the datalift API.
//!
//! Test suites drive the service through [`ApiClient`], configured from the
//! environment via [`Settings`]. Waiting for a job is a bounded-retry
//! polling loop, never an unbounded spin: exhausting the attempt budget is
//! an error value, not a crash.

pub mod api;
pub mod error;
pub mod settings;

pub use api::{ApiClient, PollOptions};
pub use error::ClientError;
pub use settings::Settings;

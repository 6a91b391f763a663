// crates/db/src/seed.rs
//! Seeding helpers for deterministic tests.
//!
//! Rows inserted here bypass the extraction adapter entirely: tests arrange
//! exact statuses, timestamps and record counts up front, then drive the API
//! read-only. Callers are responsible for keeping seeded `record_count`
//! consistent with the records they seed.

use datalift_core::{ExtractionJob, JobStatus};
use uuid::Uuid;

use crate::{now_ts, Database, DbResult};

/// Template for a directly-inserted job row.
#[derive(Debug, Clone)]
pub struct SeedJob {
    pub status: JobStatus,
    pub record_count: i64,
    pub connection_id: Option<Uuid>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub error_message: Option<String>,
    pub created_at: Option<i64>,
}

impl Default for SeedJob {
    fn default() -> Self {
        Self {
            status: JobStatus::Pending,
            record_count: 0,
            connection_id: None,
            start_time: None,
            end_time: None,
            error_message: None,
            created_at: None,
        }
    }
}

impl SeedJob {
    pub fn with_status(status: JobStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }
}

impl Database {
    /// Insert a job row exactly as described, bypassing the lifecycle engine.
    pub async fn seed_job(&self, seed: SeedJob) -> DbResult<ExtractionJob> {
        let now = now_ts();
        let job = ExtractionJob {
            job_id: Uuid::new_v4(),
            connection_id: seed.connection_id.unwrap_or_else(Uuid::new_v4),
            status: seed.status,
            record_count: seed.record_count,
            start_time: seed.start_time.unwrap_or(now),
            end_time: seed.end_time,
            error_message: seed.error_message,
            created_at: seed.created_at.unwrap_or(now),
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO extraction_jobs (
                job_id, connection_id, status, record_count,
                start_time, end_time, error_message, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(job.job_id.to_string())
        .bind(job.connection_id.to_string())
        .bind(job.status.as_str())
        .bind(job.record_count)
        .bind(job.start_time)
        .bind(job.end_time)
        .bind(job.error_message.as_deref())
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(self.pool())
        .await?;

        Ok(job)
    }

    /// Insert `count` deterministic records for a job.
    pub async fn seed_records(&self, job_id: Uuid, count: usize) -> DbResult<usize> {
        let now = now_ts();
        for i in 0..count {
            sqlx::query(
                r#"
                INSERT INTO extraction_records (
                    job_id, email, first_name, last_name, id_from_service, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(job_id.to_string())
            .bind(format!("user{i}@example.com"))
            .bind(format!("First{i}"))
            .bind(format!("Last{i}"))
            .bind(format!("svc-{i}"))
            .bind(now + i as i64)
            .execute(self.pool())
            .await?;
        }
        Ok(count)
    }
}

// crates/db/src/queries/jobs.rs
// Job CRUD and lifecycle transitions.
//
// Every status mutation is a compare-and-set UPDATE whose WHERE clause is
// generated from the lifecycle engine's legal-source sets. Zero affected
// rows means the transition lost a race (or was illegal to begin with) and
// the current status decides the outcome.

use datalift_core::{ExtractedContact, ExtractionJob, JobEvent, JobStatus};
use tracing::debug;
use uuid::Uuid;

use super::row_types::{JobRow, JOB_COLUMNS};
use super::types::{CancelOutcome, JobFilter, JobPage, RemoveOutcome};
use crate::{now_ts, Database, DbResult};

/// Render an event's legal source statuses as a SQL `IN` list.
///
/// The values come from the engine's static tables, never from user input.
fn status_guard(event: JobEvent) -> String {
    event
        .legal_sources()
        .iter()
        .map(|s| format!("'{}'", s.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// All terminal statuses as a SQL `IN` list.
fn terminal_guard() -> String {
    JobStatus::ALL
        .iter()
        .filter(|s| s.is_terminal())
        .map(|s| format!("'{}'", s.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Database {
    /// Create a new job in `pending` with fresh job and connection ids.
    pub async fn create_job(&self) -> DbResult<ExtractionJob> {
        let now = now_ts();
        let job = ExtractionJob {
            job_id: Uuid::new_v4(),
            connection_id: Uuid::new_v4(),
            status: JobStatus::Pending,
            record_count: 0,
            start_time: now,
            end_time: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO extraction_jobs (
                job_id, connection_id, status, record_count,
                start_time, end_time, error_message, created_at, updated_at
            ) VALUES (?1, ?2, ?3, 0, ?4, NULL, NULL, ?4, ?4)
            "#,
        )
        .bind(job.job_id.to_string())
        .bind(job.connection_id.to_string())
        .bind(job.status.as_str())
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(job)
    }

    /// Fetch a single job by id.
    pub async fn get_job(&self, job_id: Uuid) -> DbResult<Option<ExtractionJob>> {
        let row: Option<JobRow> = sqlx::query_as(&format!(
            "SELECT {JOB_COLUMNS} FROM extraction_jobs WHERE job_id = ?1"
        ))
        .bind(job_id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.map(JobRow::into_job).transpose()
    }

    /// CAS `pending -> in_progress`. Returns false when the job is gone or
    /// already left `pending` (e.g. cancelled before extraction started).
    pub async fn begin_job(&self, job_id: Uuid) -> DbResult<bool> {
        let now = now_ts();
        let guard = status_guard(JobEvent::Begin);
        let rows = sqlx::query(&format!(
            "UPDATE extraction_jobs
             SET status = ?1, start_time = ?2, updated_at = ?2
             WHERE job_id = ?3 AND status IN ({guard})"
        ))
        .bind(JobEvent::Begin.target().as_str())
        .bind(now)
        .bind(job_id.to_string())
        .execute(self.pool())
        .await?
        .rows_affected();

        Ok(rows == 1)
    }

    /// CAS `in_progress -> completed`, inserting the extracted records in the
    /// same transaction.
    ///
    /// A lost race (the job was cancelled while extraction ran) rolls the
    /// record inserts back and returns false, which is what keeps
    /// `record_count` equal to the owned-row count in every terminal state.
    pub async fn complete_job(
        &self,
        job_id: Uuid,
        contacts: &[ExtractedContact],
    ) -> DbResult<bool> {
        let now = now_ts();
        let mut tx = self.pool().begin().await?;

        let guard = status_guard(JobEvent::Succeed);
        let rows = sqlx::query(&format!(
            "UPDATE extraction_jobs
             SET status = ?1, record_count = ?2, end_time = ?3, updated_at = ?3
             WHERE job_id = ?4 AND status IN ({guard})"
        ))
        .bind(JobEvent::Succeed.target().as_str())
        .bind(contacts.len() as i64)
        .bind(now)
        .bind(job_id.to_string())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if rows == 0 {
            tx.rollback().await?;
            debug!(job_id = %job_id, "completion lost the transition race, records dropped");
            return Ok(false);
        }

        for contact in contacts {
            sqlx::query(
                r#"
                INSERT INTO extraction_records (
                    job_id, email, first_name, last_name, id_from_service, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(job_id.to_string())
            .bind(&contact.email)
            .bind(&contact.first_name)
            .bind(&contact.last_name)
            .bind(&contact.id_from_service)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// CAS `in_progress -> failed`, recording the upstream error message.
    pub async fn fail_job(&self, job_id: Uuid, error_message: &str) -> DbResult<bool> {
        let now = now_ts();
        let guard = status_guard(JobEvent::Fail);
        let rows = sqlx::query(&format!(
            "UPDATE extraction_jobs
             SET status = ?1, error_message = ?2, end_time = ?3, updated_at = ?3
             WHERE job_id = ?4 AND status IN ({guard})"
        ))
        .bind(JobEvent::Fail.target().as_str())
        .bind(error_message)
        .bind(now)
        .bind(job_id.to_string())
        .execute(self.pool())
        .await?
        .rows_affected();

        Ok(rows == 1)
    }

    /// CAS `{pending, in_progress} -> cancelled`.
    pub async fn cancel_job(&self, job_id: Uuid) -> DbResult<CancelOutcome> {
        let now = now_ts();
        let guard = status_guard(JobEvent::Cancel);
        let rows = sqlx::query(&format!(
            "UPDATE extraction_jobs
             SET status = ?1, end_time = ?2, updated_at = ?2
             WHERE job_id = ?3 AND status IN ({guard})"
        ))
        .bind(JobEvent::Cancel.target().as_str())
        .bind(now)
        .bind(job_id.to_string())
        .execute(self.pool())
        .await?
        .rows_affected();

        if rows == 1 {
            match self.get_job(job_id).await? {
                Some(job) => return Ok(CancelOutcome::Cancelled(job)),
                None => return Ok(CancelOutcome::NotFound),
            }
        }

        // The guard did not match: the job is gone, or already terminal.
        match self.get_job(job_id).await? {
            None => Ok(CancelOutcome::NotFound),
            Some(job) => Ok(CancelOutcome::AlreadyTerminal(job.status)),
        }
    }

    /// Delete a terminal job and all its records.
    ///
    /// The delete is guarded on terminality, so a job that is still live (or
    /// that a racing transition just revived into `in_progress`) is left
    /// untouched and reported as `NotRemovable`.
    pub async fn remove_job(&self, job_id: Uuid) -> DbResult<RemoveOutcome> {
        let guard = terminal_guard();
        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM extraction_records WHERE job_id = ?1")
            .bind(job_id.to_string())
            .execute(&mut *tx)
            .await?;

        let rows = sqlx::query(&format!(
            "DELETE FROM extraction_jobs WHERE job_id = ?1 AND status IN ({guard})"
        ))
        .bind(job_id.to_string())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if rows == 1 {
            tx.commit().await?;
            return Ok(RemoveOutcome::Removed);
        }

        // Nothing deleted: roll back the record delete and report why.
        tx.rollback().await?;
        match self.get_job(job_id).await? {
            None => Ok(RemoveOutcome::NotFound),
            Some(job) => Ok(RemoveOutcome::NotRemovable(job.status)),
        }
    }

    /// List jobs ordered by creation time descending (ties broken by id so
    /// pages stay stable), optionally filtered by status.
    pub async fn list_jobs(&self, filter: JobFilter) -> DbResult<JobPage> {
        let (total, rows): (i64, Vec<JobRow>) = match filter.status {
            Some(status) => {
                let (total,): (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM extraction_jobs WHERE status = ?1")
                        .bind(status.as_str())
                        .fetch_one(self.pool())
                        .await?;
                let rows = sqlx::query_as(&format!(
                    "SELECT {JOB_COLUMNS} FROM extraction_jobs
                     WHERE status = ?1
                     ORDER BY created_at DESC, job_id
                     LIMIT ?2 OFFSET ?3"
                ))
                .bind(status.as_str())
                .bind(filter.limit)
                .bind(filter.offset)
                .fetch_all(self.pool())
                .await?;
                (total, rows)
            }
            None => {
                let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM extraction_jobs")
                    .fetch_one(self.pool())
                    .await?;
                let rows = sqlx::query_as(&format!(
                    "SELECT {JOB_COLUMNS} FROM extraction_jobs
                     ORDER BY created_at DESC, job_id
                     LIMIT ?1 OFFSET ?2"
                ))
                .bind(filter.limit)
                .bind(filter.offset)
                .fetch_all(self.pool())
                .await?;
                (total, rows)
            }
        };

        let jobs = rows
            .into_iter()
            .map(JobRow::into_job)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(JobPage { jobs, total })
    }
}

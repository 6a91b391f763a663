// crates/db/src/queries/stats.rs
// Aggregate job statistics, computed directly from the table on every call.

use datalift_core::api::JobStatistics;
use sqlx::Row;

use crate::{Database, DbResult};

#[derive(Debug)]
struct StatusCountsRow {
    total: i64,
    pending: i64,
    in_progress: i64,
    completed: i64,
    failed: i64,
    cancelled: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for StatusCountsRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            total: row.try_get("total")?,
            pending: row.try_get("pending")?,
            in_progress: row.try_get("in_progress")?,
            completed: row.try_get("completed")?,
            failed: row.try_get("failed")?,
            cancelled: row.try_get("cancelled")?,
        })
    }
}

impl Database {
    /// Per-status counts plus the mean extraction time of completed jobs.
    ///
    /// No caching: the counts reflect the table at the moment of the query,
    /// and the five buckets always sum to `total_jobs`.
    pub async fn statistics(&self) -> DbResult<JobStatistics> {
        let counts: StatusCountsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*)                                  AS total,
                COALESCE(SUM(status = 'pending'), 0)      AS pending,
                COALESCE(SUM(status = 'in_progress'), 0)  AS in_progress,
                COALESCE(SUM(status = 'completed'), 0)    AS completed,
                COALESCE(SUM(status = 'failed'), 0)       AS failed,
                COALESCE(SUM(status = 'cancelled'), 0)    AS cancelled
            FROM extraction_jobs
            "#,
        )
        .fetch_one(self.pool())
        .await?;

        let (average_extraction_time,): (Option<f64>,) = sqlx::query_as(
            "SELECT AVG(end_time - start_time)
             FROM extraction_jobs
             WHERE status = 'completed' AND end_time IS NOT NULL",
        )
        .fetch_one(self.pool())
        .await?;

        Ok(JobStatistics {
            total_jobs: counts.total,
            pending_jobs: counts.pending,
            in_progress_jobs: counts.in_progress,
            completed_jobs: counts.completed,
            failed_jobs: counts.failed,
            cancelled_jobs: counts.cancelled,
            average_extraction_time,
        })
    }
}

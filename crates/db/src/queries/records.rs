// crates/db/src/queries/records.rs
// Extracted-record reads. Writes happen only inside `complete_job`'s
// transaction and the seeding helpers.

use uuid::Uuid;

use super::row_types::RecordRow;
use super::types::RecordPage;
use crate::{Database, DbResult};

impl Database {
    /// Page through a job's records in insertion order.
    pub async fn job_records(
        &self,
        job_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> DbResult<RecordPage> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM extraction_records WHERE job_id = ?1")
                .bind(job_id.to_string())
                .fetch_one(self.pool())
                .await?;

        let rows: Vec<RecordRow> = sqlx::query_as(
            "SELECT id, job_id, email, first_name, last_name, id_from_service, created_at
             FROM extraction_records
             WHERE job_id = ?1
             ORDER BY created_at, id
             LIMIT ?2 OFFSET ?3",
        )
        .bind(job_id.to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await?;

        let records = rows
            .into_iter()
            .map(RecordRow::into_record)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(RecordPage { records, total })
    }

    /// Number of records owned by a job (0 for unknown jobs).
    pub async fn record_count(&self, job_id: Uuid) -> DbResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM extraction_records WHERE job_id = ?1")
                .bind(job_id.to_string())
                .fetch_one(self.pool())
                .await?;
        Ok(count)
    }
}

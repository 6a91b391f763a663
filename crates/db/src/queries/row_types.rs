// crates/db/src/queries/row_types.rs
// Raw sqlx row shapes and their conversions into domain types.

use datalift_core::{ExtractionJob, ExtractionRecord};
use sqlx::Row;
use uuid::Uuid;

use crate::{DbError, DbResult};

/// Column list shared by every job SELECT.
pub(crate) const JOB_COLUMNS: &str = "job_id, connection_id, status, record_count, \
     start_time, end_time, error_message, created_at, updated_at";

#[derive(Debug)]
pub(crate) struct JobRow {
    job_id: String,
    connection_id: String,
    status: String,
    record_count: i64,
    start_time: i64,
    end_time: Option<i64>,
    error_message: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for JobRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            job_id: row.try_get("job_id")?,
            connection_id: row.try_get("connection_id")?,
            status: row.try_get("status")?,
            record_count: row.try_get("record_count")?,
            start_time: row.try_get("start_time")?,
            end_time: row.try_get("end_time")?,
            error_message: row.try_get("error_message")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl JobRow {
    pub(crate) fn into_job(self) -> DbResult<ExtractionJob> {
        Ok(ExtractionJob {
            job_id: parse_uuid(&self.job_id)?,
            connection_id: parse_uuid(&self.connection_id)?,
            status: self
                .status
                .parse()
                .map_err(|e| DbError::CorruptRow(format!("job {}: {e}", self.job_id)))?,
            record_count: self.record_count,
            start_time: self.start_time,
            end_time: self.end_time,
            error_message: self.error_message,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug)]
pub(crate) struct RecordRow {
    id: i64,
    job_id: String,
    email: String,
    first_name: String,
    last_name: String,
    id_from_service: String,
    created_at: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for RecordRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            job_id: row.try_get("job_id")?,
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            id_from_service: row.try_get("id_from_service")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl RecordRow {
    pub(crate) fn into_record(self) -> DbResult<ExtractionRecord> {
        Ok(ExtractionRecord {
            id: self.id,
            job_id: parse_uuid(&self.job_id)?,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            id_from_service: self.id_from_service,
            created_at: self.created_at,
        })
    }
}

fn parse_uuid(s: &str) -> DbResult<Uuid> {
    Uuid::parse_str(s).map_err(|e| DbError::CorruptRow(format!("invalid uuid {s}: {e}")))
}

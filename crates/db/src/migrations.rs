/// Inline SQL migrations for the datalift job store.
///
/// We use simple inline migrations rather than sqlx migration files
/// because the schema is small and self-contained.
pub const MIGRATIONS: &[&str] = &[
    // Migration 1: extraction_jobs table
    r#"
CREATE TABLE IF NOT EXISTS extraction_jobs (
    job_id        TEXT PRIMARY KEY,
    connection_id TEXT NOT NULL,
    status        TEXT NOT NULL DEFAULT 'pending',
    record_count  INTEGER NOT NULL DEFAULT 0 CHECK (record_count >= 0),
    start_time    INTEGER NOT NULL,
    end_time      INTEGER,
    error_message TEXT,
    created_at    INTEGER NOT NULL,
    updated_at    INTEGER NOT NULL
);
"#,
    // Migration 2: job indexes (status filter + stable listing order)
    r#"CREATE INDEX IF NOT EXISTS idx_jobs_status ON extraction_jobs(status);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_jobs_created ON extraction_jobs(created_at DESC, job_id);"#,
    // Migration 3: extraction_records table
    r#"
CREATE TABLE IF NOT EXISTS extraction_records (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    job_id          TEXT NOT NULL REFERENCES extraction_jobs(job_id) ON DELETE CASCADE,
    email           TEXT NOT NULL DEFAULT '',
    first_name      TEXT NOT NULL DEFAULT '',
    last_name       TEXT NOT NULL DEFAULT '',
    id_from_service TEXT NOT NULL DEFAULT '',
    created_at      INTEGER NOT NULL
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_records_job ON extraction_records(job_id);"#,
];

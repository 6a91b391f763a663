// crates/server/src/extraction/runner.rs
//! Background task driving a job through the lifecycle engine.
//!
//! Outcomes never propagate to the request that started the job: success
//! and failure both land on the job row, and a cancel that wins the race
//! simply makes the runner's guarded transitions miss.

use std::sync::Arc;

use uuid::Uuid;

use datalift_db::Database;

use super::client::ExtractionClient;

/// Spawn `run_extraction` onto the runtime and return immediately.
pub fn spawn_extraction(
    db: Database,
    client: Arc<ExtractionClient>,
    job_id: Uuid,
    api_token: String,
) {
    tokio::spawn(run_extraction(db, client, job_id, api_token));
}

/// Drive one job: `pending -> in_progress -> completed | failed`.
pub async fn run_extraction(
    db: Database,
    client: Arc<ExtractionClient>,
    job_id: Uuid,
    api_token: String,
) {
    match db.begin_job(job_id).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!(job_id = %job_id, "job left pending before extraction began, skipping");
            return;
        }
        Err(e) => {
            tracing::error!(job_id = %job_id, error = %e, "could not begin job");
            return;
        }
    }

    match client.fetch_contacts(&api_token).await {
        Ok(contacts) => match db.complete_job(job_id, &contacts).await {
            Ok(true) => {
                tracing::info!(job_id = %job_id, records = contacts.len(), "extraction completed");
            }
            Ok(false) => {
                tracing::info!(job_id = %job_id, "job cancelled during extraction, results dropped");
            }
            Err(e) => {
                tracing::error!(job_id = %job_id, error = %e, "failed to store extraction results");
            }
        },
        Err(e) => {
            tracing::warn!(job_id = %job_id, error = %e, "extraction failed");
            match db.fail_job(job_id, &e.to_string()).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::info!(job_id = %job_id, "job already terminal, failure not recorded");
                }
                Err(db_err) => {
                    tracing::error!(job_id = %job_id, error = %db_err, "could not record failure");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datalift_core::JobStatus;
    use std::time::Duration;

    fn client_for(server: &mockito::ServerGuard) -> Arc<ExtractionClient> {
        Arc::new(ExtractionClient::new(server.url(), Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_successful_extraction_completes_job() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/crm/v3/objects/contacts")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results":[
                    {"id":"101","properties":{"email":"ada@example.com","firstname":"Ada","lastname":"Lovelace"}},
                    {"id":"102","properties":{"email":"alan@example.com","firstname":"Alan","lastname":"Turing"}},
                    {"id":"103","properties":{"email":"grace@example.com","firstname":"Grace","lastname":"Hopper"}}
                ]}"#,
            )
            .create_async()
            .await;

        let db = Database::new_in_memory().await.unwrap();
        let job = db.create_job().await.unwrap();
        run_extraction(db.clone(), client_for(&server), job.job_id, "pat-ok-token".into()).await;

        mock.assert_async().await;
        let job = db.get_job(job.job_id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.record_count, 3);
        assert!(job.end_time.is_some());

        let page = db.job_records(job.job_id, 10, 0).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.records[0].email, "ada@example.com");
        assert_eq!(page.records[2].id_from_service, "103");
    }

    #[tokio::test]
    async fn test_upstream_error_fails_job() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/crm/v3/objects/contacts")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let db = Database::new_in_memory().await.unwrap();
        let job = db.create_job().await.unwrap();
        run_extraction(db.clone(), client_for(&server), job.job_id, "pat-ok-token".into()).await;

        let job = db.get_job(job.job_id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.end_time.is_some());
        let message = job.error_message.unwrap();
        assert!(message.contains("500"), "error message was: {message}");
        assert_eq!(db.record_count(job.job_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_job_is_never_fetched() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/crm/v3/objects/contacts")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let db = Database::new_in_memory().await.unwrap();
        let job = db.create_job().await.unwrap();
        db.cancel_job(job.job_id).await.unwrap();

        run_extraction(db.clone(), client_for(&server), job.job_id, "pat-ok-token".into()).await;

        mock.assert_async().await;
        let job = db.get_job(job.job_id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Cancelled);
        assert_eq!(db.record_count(job.job_id).await.unwrap(), 0);
    }
}

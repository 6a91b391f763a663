//! Integration tests for the harness API client against a mock server.

use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use datalift_client::{ApiClient, ClientError, PollOptions};
use datalift_core::JobStatus;

fn job_json(job_id: Uuid, status: &str) -> serde_json::Value {
    json!({
        "job_id": job_id,
        "connection_id": Uuid::new_v4(),
        "status": status,
        "record_count": 0,
        "start_time": 1_700_000_000,
        "end_time": null,
        "error_message": null,
        "created_at": 1_700_000_000,
        "updated_at": 1_700_000_000,
    })
}

fn client(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(server.url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_start_extraction_posts_token_and_decodes_job() {
    let mut server = mockito::Server::new_async().await;
    let job_id = Uuid::new_v4();
    let mock = server
        .mock("POST", "/api/v1/scan/start")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(json!({"api_token": "pat-na1-token"})))
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(job_json(job_id, "pending").to_string())
        .create_async()
        .await;

    let job = client(&server)
        .start_extraction("pat-na1-token")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(job.job_id, job_id);
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.record_count, 0);
}

#[tokio::test]
async fn test_api_error_body_is_decoded() {
    let mut server = mockito::Server::new_async().await;
    let job_id = Uuid::nil();
    server
        .mock("GET", format!("/api/v1/scan/status/{job_id}").as_str())
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": "Job not found",
                "details": format!("Job ID {job_id} does not exist"),
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client(&server).job_status(job_id).await.unwrap_err();
    match &err {
        ClientError::Api { status, message } => {
            assert_eq!(*status, 404);
            assert!(message.contains("Job not found"), "message: {message}");
            assert!(message.contains("does not exist"), "message: {message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(err.api_status(), Some(404));
}

#[tokio::test]
async fn test_remove_job_handles_204_without_body() {
    let mut server = mockito::Server::new_async().await;
    let job_id = Uuid::new_v4();
    let mock = server
        .mock("DELETE", format!("/api/v1/scan/remove/{job_id}").as_str())
        .with_status(204)
        .create_async()
        .await;

    client(&server).remove_job(job_id).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_jobs_sends_filter_and_page_bounds() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/jobs/jobs")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("status".into(), "failed".into()),
            mockito::Matcher::UrlEncoded("limit".into(), "5".into()),
            mockito::Matcher::UrlEncoded("offset".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": [job_json(Uuid::new_v4(), "failed")],
                "total": 11,
                "limit": 5,
                "offset": 10,
                "next": null,
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page = client(&server)
        .list_jobs(Some(JobStatus::Failed), Some(5), Some(10))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.total, 11);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].status, JobStatus::Failed);
}

#[tokio::test]
async fn test_statistics_round_trip() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/jobs/statistics")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "total_jobs": 6,
                "pending_jobs": 1,
                "in_progress_jobs": 1,
                "completed_jobs": 2,
                "failed_jobs": 1,
                "cancelled_jobs": 1,
                "average_extraction_time": 12.5,
            })
            .to_string(),
        )
        .create_async()
        .await;

    let stats = client(&server).statistics().await.unwrap();
    assert_eq!(stats.total_jobs, 6);
    assert_eq!(stats.bucket_sum(), 6);
    assert_eq!(stats.average_extraction_time, Some(12.5));
}

#[tokio::test]
async fn test_poll_returns_on_expected_status() {
    let mut server = mockito::Server::new_async().await;
    let job_id = Uuid::new_v4();
    let mock = server
        .mock("GET", format!("/api/v1/scan/status/{job_id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(job_json(job_id, "completed").to_string())
        .expect(1)
        .create_async()
        .await;

    let job = client(&server)
        .poll_job_status(
            job_id,
            &[JobStatus::Completed, JobStatus::Failed],
            PollOptions {
                interval: Duration::from_millis(5),
                max_attempts: 10,
            },
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(job.status, JobStatus::Completed);
}

#[tokio::test]
async fn test_poll_budget_exhaustion_is_an_error_value() {
    let mut server = mockito::Server::new_async().await;
    let job_id = Uuid::new_v4();
    let mock = server
        .mock("GET", format!("/api/v1/scan/status/{job_id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(job_json(job_id, "in_progress").to_string())
        .expect(3)
        .create_async()
        .await;

    let err = client(&server)
        .poll_job_status(
            job_id,
            &[JobStatus::Completed],
            PollOptions {
                interval: Duration::from_millis(1),
                max_attempts: 3,
            },
        )
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        ClientError::PollTimeout {
            job_id: id,
            attempts,
            last_status,
            ..
        } => {
            assert_eq!(id, job_id);
            assert_eq!(attempts, 3);
            assert_eq!(last_status, Some(JobStatus::InProgress));
        }
        other => panic!("expected PollTimeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_poll_surfaces_caller_deadline() {
    let mut server = mockito::Server::new_async().await;
    let job_id = Uuid::new_v4();
    server
        .mock("GET", format!("/api/v1/scan/status/{job_id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(job_json(job_id, "pending").to_string())
        .create_async()
        .await;

    // Cancelling the poll itself is a caller-level concern: race it against
    // a deadline and the future just stops being driven.
    let api = client(&server);
    let result = tokio::time::timeout(
        Duration::from_millis(20),
        api.poll_job_status(
            job_id,
            &[JobStatus::Completed],
            PollOptions {
                interval: Duration::from_secs(60),
                max_attempts: 100,
            },
        ),
    )
    .await;

    assert!(result.is_err(), "deadline should fire before the poll ends");
}

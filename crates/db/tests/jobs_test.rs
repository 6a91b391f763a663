//! Integration tests for job CRUD, listing, and pagination.

use datalift_core::JobStatus;
use datalift_db::seed::SeedJob;
use datalift_db::{Database, JobFilter};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_get_round_trip() {
    let db = Database::new_in_memory().await.unwrap();
    let created = db.create_job().await.unwrap();

    let fetched = db.get_job(created.job_id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.status, JobStatus::Pending);
    assert_eq!(fetched.record_count, 0);
    assert!(fetched.end_time.is_none());
    assert!(fetched.error_message.is_none());
}

#[tokio::test]
async fn test_get_unknown_job() {
    let db = Database::new_in_memory().await.unwrap();
    assert!(db.get_job(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let db = Database::new_in_memory().await.unwrap();
    for i in 0..5 {
        db.seed_job(SeedJob {
            created_at: Some(1_700_000_000 + i),
            ..SeedJob::default()
        })
        .await
        .unwrap();
    }

    let page = db.list_jobs(JobFilter::default()).await.unwrap();
    assert_eq!(page.total, 5);
    let times: Vec<i64> = page.jobs.iter().map(|j| j.created_at).collect();
    let mut sorted = times.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(times, sorted, "listing must be created_at DESC");
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let db = Database::new_in_memory().await.unwrap();
    for status in [
        JobStatus::Pending,
        JobStatus::Completed,
        JobStatus::Completed,
        JobStatus::Failed,
    ] {
        db.seed_job(SeedJob::with_status(status)).await.unwrap();
    }

    let completed = db
        .list_jobs(JobFilter {
            status: Some(JobStatus::Completed),
            ..JobFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(completed.total, 2);
    assert!(completed
        .jobs
        .iter()
        .all(|j| j.status == JobStatus::Completed));

    let cancelled = db
        .list_jobs(JobFilter {
            status: Some(JobStatus::Cancelled),
            ..JobFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(cancelled.total, 0);
    assert!(cancelled.jobs.is_empty());
}

#[tokio::test]
async fn test_pagination_pages_are_disjoint_and_complete() {
    let db = Database::new_in_memory().await.unwrap();
    // Same created_at on purpose: the job_id tie-break must keep pages stable.
    for _ in 0..23 {
        db.seed_job(SeedJob {
            created_at: Some(1_700_000_000),
            ..SeedJob::default()
        })
        .await
        .unwrap();
    }

    let full = db
        .list_jobs(JobFilter {
            limit: 100,
            ..JobFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(full.total, 23);
    assert_eq!(full.jobs.len(), 23);

    let mut paged = Vec::new();
    let mut offset = 0;
    loop {
        let page = db
            .list_jobs(JobFilter {
                limit: 10,
                offset,
                ..JobFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 23, "total is the filter-wide count");
        if page.jobs.is_empty() {
            break;
        }
        paged.extend(page.jobs);
        offset += 10;
    }

    let full_ids: Vec<Uuid> = full.jobs.iter().map(|j| j.job_id).collect();
    let paged_ids: Vec<Uuid> = paged.iter().map(|j| j.job_id).collect();
    assert_eq!(paged_ids, full_ids, "page concatenation equals full listing");

    let mut dedup = paged_ids.clone();
    dedup.sort();
    dedup.dedup();
    assert_eq!(dedup.len(), 23, "pages must be disjoint");
}

#[tokio::test]
async fn test_seeded_records_page_in_insertion_order() {
    let db = Database::new_in_memory().await.unwrap();
    let job = db
        .seed_job(SeedJob {
            status: JobStatus::Completed,
            record_count: 7,
            ..SeedJob::default()
        })
        .await
        .unwrap();
    db.seed_records(job.job_id, 7).await.unwrap();

    let first = db.job_records(job.job_id, 3, 0).await.unwrap();
    assert_eq!(first.total, 7);
    assert_eq!(first.records.len(), 3);
    assert_eq!(first.records[0].email, "user0@example.com");

    let rest = db.job_records(job.job_id, 10, 3).await.unwrap();
    assert_eq!(rest.records.len(), 4);
    assert_eq!(rest.records[0].email, "user3@example.com");
    assert!(rest.records.iter().all(|r| r.job_id == job.job_id));
}

#[tokio::test]
async fn test_file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datalift.db");

    let job_id = {
        let db = Database::new(&path).await.unwrap();
        db.create_job().await.unwrap().job_id
    };

    let db = Database::new(&path).await.unwrap();
    let job = db.get_job(job_id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Pending);
}

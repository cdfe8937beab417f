//! Ingestion trigger and status polling.

use std::time::Duration;

use kbsync_core::{IngestionStatus, SyncError};
use kbsync_sync::{start_ingestion, wait_for_completion};
use tokio::time::Instant;

use crate::scripted::{Call, ScriptedApi};

const INTERVAL: Duration = Duration::from_secs(10);

#[tokio::test(start_paused = true)]
async fn polls_until_complete() {
    let api = ScriptedApi::new().job("ds-1", "job-9", &["IN_PROGRESS", "COMPLETE"]);
    let mut lines: Vec<String> = Vec::new();

    let job = start_ingestion(&api, &mut lines, "kb-123", "ds-1").await.unwrap();
    assert_eq!(job.job_id, "job-9");

    let started = Instant::now();
    let finished = wait_for_completion(&api, &mut lines, &job, INTERVAL).await.unwrap();

    assert_eq!(finished.status, IngestionStatus::Complete);
    assert_eq!(api.count(|c| matches!(c, Call::GetIngestionJob(..))), 2);
    // One sleep between the two polls.
    let waited = started.elapsed();
    assert!(waited >= INTERVAL && waited < INTERVAL * 2, "waited {waited:?}");
    assert_eq!(
        lines,
        vec![
            "✅ Ingestion started (DS: ds-1, Job: job-9)",
            "⏳ Status (DS: ds-1): IN_PROGRESS",
            "⏳ Status (DS: ds-1): COMPLETE",
            "🎯 Final status (DS: ds-1): COMPLETE",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn queries_with_the_key_that_started_the_job() {
    let api = ScriptedApi::new().job("ds-7", "job-x", &["STARTING", "FAILED"]);
    let mut lines: Vec<String> = Vec::new();

    let job = start_ingestion(&api, &mut lines, "kb-5", "ds-7").await.unwrap();
    let finished = wait_for_completion(&api, &mut lines, &job, INTERVAL).await.unwrap();

    assert_eq!(finished.status, IngestionStatus::Failed);
    assert_eq!(
        api.calls(),
        vec![
            Call::StartIngestionJob("kb-5".into(), "ds-7".into()),
            Call::GetIngestionJob("kb-5".into(), "ds-7".into(), "job-x".into()),
            Call::GetIngestionJob("kb-5".into(), "ds-7".into(), "job-x".into()),
        ]
    );
    assert_eq!(
        lines.last().unwrap(),
        "🎯 Final status (DS: ds-7): FAILED (document parsing failed)"
    );
}

#[tokio::test(start_paused = true)]
async fn already_terminal_job_needs_one_poll_and_no_sleep() {
    let api = ScriptedApi::new().job("ds-1", "job-1", &["COMPLETE"]);
    let mut lines: Vec<String> = Vec::new();
    let job = start_ingestion(&api, &mut lines, "kb-1", "ds-1").await.unwrap();

    let started = Instant::now();
    wait_for_completion(&api, &mut lines, &job, INTERVAL).await.unwrap();

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(api.count(|c| matches!(c, Call::GetIngestionJob(..))), 1);
}

#[tokio::test(start_paused = true)]
async fn completed_job_observes_the_same_state_repeatedly() {
    let api = ScriptedApi::new().job("ds-1", "job-1", &["COMPLETE"]);
    let mut lines: Vec<String> = Vec::new();
    let job = start_ingestion(&api, &mut lines, "kb-1", "ds-1").await.unwrap();

    for _ in 0..3 {
        let finished = wait_for_completion(&api, &mut lines, &job, INTERVAL).await.unwrap();
        assert_eq!(finished.status, IngestionStatus::Complete);
    }
    assert_eq!(api.count(|c| matches!(c, Call::StartIngestionJob(..))), 1);
}

#[tokio::test(start_paused = true)]
async fn stopped_is_not_terminal() {
    let api = ScriptedApi::new().job("ds-1", "job-1", &["STOPPING", "STOPPED", "COMPLETE"]);
    let mut lines: Vec<String> = Vec::new();
    let job = start_ingestion(&api, &mut lines, "kb-1", "ds-1").await.unwrap();

    let finished = wait_for_completion(&api, &mut lines, &job, INTERVAL).await.unwrap();

    assert_eq!(finished.status, IngestionStatus::Complete);
    assert_eq!(api.count(|c| matches!(c, Call::GetIngestionJob(..))), 3);
}

#[tokio::test]
async fn start_failure_propagates_without_polling() {
    let api = ScriptedApi::new().failing_start("ds-1", "ThrottlingException");
    let mut lines: Vec<String> = Vec::new();

    let err = start_ingestion(&api, &mut lines, "kb-1", "ds-1").await.unwrap_err();

    assert!(matches!(err, SyncError::Remote { operation: "StartIngestionJob", .. }));
    assert!(lines.is_empty());
    assert_eq!(api.count(|c| matches!(c, Call::GetIngestionJob(..))), 0);
}

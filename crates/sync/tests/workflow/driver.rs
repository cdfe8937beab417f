//! End-to-end batch scenarios.

use std::time::Duration;

use kbsync_core::IngestionStatus;
use kbsync_sync::{run_batch, sync_knowledge_base, KbOutcome};

use crate::scripted::{Call, ScriptedApi};

const INTERVAL: Duration = Duration::from_secs(10);

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test(start_paused = true)]
async fn single_knowledge_base_completes_after_two_polls() {
    let api = ScriptedApi::new()
        .knowledge_bases(vec![vec![("DocsKB", "kb-123")]])
        .data_sources("kb-123", vec![vec![("ds-1", Some("pdfs"))]])
        .job("ds-1", "job-9", &["IN_PROGRESS", "COMPLETE"]);
    let mut lines: Vec<String> = Vec::new();

    let report = run_batch(&api, &mut lines, &names(&["DocsKB"]), INTERVAL).await;

    assert_eq!(
        lines,
        vec![
            "🔍 Discovering Knowledge Bases & Data Sources...",
            "📘 KB: DocsKB",
            "   ↳ KB ID: kb-123",
            "   ↳ Found 1 data source(s)",
            "🚀 Syncing Data Source: pdfs (ds-1)",
            "✅ Ingestion started (DS: ds-1, Job: job-9)",
            "⏳ Status (DS: ds-1): IN_PROGRESS",
            "⏳ Status (DS: ds-1): COMPLETE",
            "🎯 Final status (DS: ds-1): COMPLETE",
        ]
    );
    assert_eq!(api.count(|c| matches!(c, Call::GetIngestionJob(..))), 2);

    assert_eq!(report.succeeded(), 1);
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.knowledge_base_id.as_deref(), Some("kb-123"));
    assert_eq!(outcome.data_sources[0].job_id.as_deref(), Some("job-9"));
    assert_eq!(outcome.data_sources[0].status, Some(IngestionStatus::Complete));
}

#[tokio::test(start_paused = true)]
async fn unresolvable_name_does_not_stop_the_batch() {
    let api = ScriptedApi::new()
        .knowledge_bases(vec![vec![("DocsKB", "kb-123")]])
        .data_sources("kb-123", vec![vec![("ds-1", Some("pdfs"))]])
        .job("ds-1", "job-9", &["COMPLETE"]);
    let mut lines: Vec<String> = Vec::new();

    let report = run_batch(&api, &mut lines, &names(&["Ghost", "DocsKB"]), INTERVAL).await;

    assert!(lines.contains(
        &"❌ Failed for KB 'Ghost': Knowledge Base with name 'Ghost' not found".to_string()
    ));
    assert_eq!(lines.last().unwrap(), "🎯 Final status (DS: ds-1): COMPLETE");

    assert_eq!(report.outcomes.len(), 2);
    assert!(!report.outcomes[0].is_success());
    assert_eq!(report.outcomes[0].knowledge_base_id, None);
    assert!(report.outcomes[1].is_success());
    assert_eq!(report.failed(), 1);
    // Only the resolvable knowledge base reached ingestion.
    assert_eq!(
        api.count(|c| matches!(c, Call::StartIngestionJob(kb, _) if kb == "kb-123")),
        1
    );
    assert_eq!(api.count(|c| matches!(c, Call::StartIngestionJob(..))), 1);
}

#[tokio::test(start_paused = true)]
async fn data_source_listing_error_skips_ingestion() {
    let api = ScriptedApi::new()
        .knowledge_bases(vec![vec![("DocsKB", "kb-123")]])
        .failing_listing("kb-123", "ThrottlingException: Rate exceeded");
    let mut lines: Vec<String> = Vec::new();

    let report = run_batch(&api, &mut lines, &names(&["DocsKB"]), INTERVAL).await;

    assert_eq!(report.failed(), 1);
    let error = report.outcomes[0].error.as_deref().unwrap();
    assert!(error.contains("ThrottlingException"));
    assert!(lines.last().unwrap().starts_with("❌ Failed for KB 'DocsKB': ListDataSources failed"));
    assert_eq!(api.count(Call::is_ingestion), 0);
}

#[tokio::test(start_paused = true)]
async fn knowledge_base_without_data_sources_fails_before_trigger() {
    let api = ScriptedApi::new().knowledge_bases(vec![vec![("EmptyKB", "kb-0")]]);
    let mut lines: Vec<String> = Vec::new();

    let report = run_batch(&api, &mut lines, &names(&["EmptyKB"]), INTERVAL).await;

    assert_eq!(
        report.outcomes[0].error.as_deref(),
        Some("No data sources found for KB kb-0")
    );
    assert_eq!(api.count(Call::is_ingestion), 0);
}

#[tokio::test(start_paused = true)]
async fn data_sources_run_sequentially_in_catalog_order() {
    let api = ScriptedApi::new()
        .knowledge_bases(vec![vec![("DocsKB", "kb-123")]])
        .data_sources(
            "kb-123",
            vec![vec![("ds-1", Some("pdfs"))], vec![("ds-2", None)]],
        )
        .job("ds-1", "job-a", &["IN_PROGRESS", "COMPLETE"])
        .job("ds-2", "job-b", &["FAILED"]);
    let mut lines: Vec<String> = Vec::new();

    let report = run_batch(&api, &mut lines, &names(&["DocsKB"]), INTERVAL).await;

    let ingestion: Vec<Call> = api.calls().into_iter().filter(Call::is_ingestion).collect();
    assert_eq!(
        ingestion,
        vec![
            Call::StartIngestionJob("kb-123".into(), "ds-1".into()),
            Call::GetIngestionJob("kb-123".into(), "ds-1".into(), "job-a".into()),
            Call::GetIngestionJob("kb-123".into(), "ds-1".into(), "job-a".into()),
            Call::StartIngestionJob("kb-123".into(), "ds-2".into()),
            Call::GetIngestionJob("kb-123".into(), "ds-2".into(), "job-b".into()),
        ]
    );
    assert!(lines.contains(&"🚀 Syncing Data Source: Unnamed (ds-2)".to_string()));

    // A FAILED job is a reported status, not a sync error.
    assert!(report.outcomes[0].is_success());
    assert_eq!(report.outcomes[0].failed_jobs(), 1);
}

#[tokio::test(start_paused = true)]
async fn data_source_failure_skips_remaining_data_sources() {
    let api = ScriptedApi::new()
        .knowledge_bases(vec![vec![("DocsKB", "kb-123"), ("FaqKB", "kb-456")]])
        .data_sources(
            "kb-123",
            vec![vec![("ds-1", Some("pdfs")), ("ds-2", Some("html")), ("ds-3", Some("csv"))]],
        )
        .data_sources("kb-456", vec![vec![("ds-9", Some("faq"))]])
        .failing_start("ds-2", "ConflictException");
    let mut lines: Vec<String> = Vec::new();

    let report = run_batch(&api, &mut lines, &names(&["DocsKB", "FaqKB"]), INTERVAL).await;

    let started: Vec<Call> = api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::StartIngestionJob(..)))
        .collect();
    assert_eq!(
        started,
        vec![
            Call::StartIngestionJob("kb-123".into(), "ds-1".into()),
            Call::StartIngestionJob("kb-123".into(), "ds-2".into()),
            Call::StartIngestionJob("kb-456".into(), "ds-9".into()),
        ]
    );

    let docs = &report.outcomes[0];
    assert!(!docs.is_success());
    assert_eq!(docs.data_sources.len(), 2);
    assert_eq!(docs.data_sources[0].status, Some(IngestionStatus::Complete));
    assert_eq!(docs.data_sources[1].job_id, None);
    assert!(report.outcomes[1].is_success());
}

#[tokio::test(start_paused = true)]
async fn sync_knowledge_base_returns_the_error() {
    let api = ScriptedApi::new();
    let mut lines: Vec<String> = Vec::new();
    let mut outcome = KbOutcome::new("Ghost");

    let result = sync_knowledge_base(&api, &mut lines, "Ghost", INTERVAL, &mut outcome).await;

    assert!(result.is_err());
    assert_eq!(lines, vec!["📘 KB: Ghost"]);
    assert!(outcome.data_sources.is_empty());
}

#[tokio::test]
async fn empty_batch_makes_no_calls() {
    let api = ScriptedApi::new();
    let mut lines: Vec<String> = Vec::new();

    let report = run_batch(&api, &mut lines, &[], INTERVAL).await;

    assert!(report.outcomes.is_empty());
    assert!(api.calls().is_empty());
}

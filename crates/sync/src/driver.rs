//! Batch driver: collect knowledge-base names, then sync them one by one.
//!
//! Failures are isolated per knowledge base. An error on one data source ends
//! that knowledge base's processing (remaining data sources are skipped) and
//! the batch moves on to the next name.

use std::time::Duration;

use tracing::{info, warn};

use kbsync_bedrock::KnowledgeBaseApi;
use kbsync_core::SyncError;

use crate::events::{Reporter, SyncEvent};
use crate::ingest::{start_ingestion, wait_for_completion};
use crate::prompt::Prompter;
use crate::report::{BatchReport, DataSourceOutcome, KbOutcome};
use crate::resolve::{find_knowledge_base, list_data_sources};

pub const COUNT_PROMPT: &str = "How many Knowledge Bases do you want to sync? ";
pub const INVALID_COUNT: &str = "Invalid number. Exiting.";
pub const NOTHING_TO_SYNC: &str = "Nothing to sync. Exiting.";

/// Ask for a count, then for that many knowledge-base names.
///
/// A non-numeric count and a count below one both fail with
/// [`SyncError::InvalidInput`] before any name is requested.
pub fn read_batch<P>(prompter: &mut P) -> Result<Vec<String>, SyncError>
where
    P: Prompter + ?Sized,
{
    let answer = prompter.prompt(COUNT_PROMPT)?.unwrap_or_default();
    let count: i64 = answer
        .trim()
        .parse()
        .map_err(|_| SyncError::InvalidInput(INVALID_COUNT.to_string()))?;
    if count <= 0 {
        return Err(SyncError::InvalidInput(NOTHING_TO_SYNC.to_string()));
    }

    let mut names = Vec::new();
    for i in 1..=count {
        let name = prompter
            .prompt(&format!("Enter Knowledge Base {i} NAME: "))?
            .ok_or_else(|| {
                SyncError::InvalidInput(format!(
                    "Input ended after {} of {count} names. Exiting.",
                    i - 1
                ))
            })?;
        names.push(name.trim().to_string());
    }

    Ok(names)
}

/// Resolve one knowledge base and run an ingestion job for each of its data
/// sources in catalog order, waiting for each job before starting the next.
///
/// Progress is recorded into `outcome` as it happens, so a failure leaves a
/// record of how far processing got.
pub async fn sync_knowledge_base<A, R>(
    api: &A,
    reporter: &mut R,
    name: &str,
    poll_interval: Duration,
    outcome: &mut KbOutcome,
) -> Result<(), SyncError>
where
    A: KnowledgeBaseApi + ?Sized,
    R: Reporter + ?Sized,
{
    reporter.report(SyncEvent::KnowledgeBaseStarted { name });

    let kb = find_knowledge_base(api, name).await?;
    outcome.knowledge_base_id = Some(kb.id.clone());
    reporter.report(SyncEvent::KnowledgeBaseResolved { knowledge_base: &kb });

    let data_sources = list_data_sources(api, &kb.id).await?;
    reporter.report(SyncEvent::DataSourcesFound {
        knowledge_base_id: &kb.id,
        count: data_sources.len(),
    });

    for ds in &data_sources {
        reporter.report(SyncEvent::DataSourceStarted { data_source: ds });
        outcome.data_sources.push(DataSourceOutcome::pending(ds));
        let slot = outcome.data_sources.len() - 1;

        let job = start_ingestion(api, reporter, &kb.id, &ds.id).await?;
        outcome.data_sources[slot].record(&job);

        let finished = wait_for_completion(api, reporter, &job, poll_interval).await?;
        outcome.data_sources[slot].record(&finished);
    }

    Ok(())
}

/// Sync every name in order, never letting one knowledge base's failure stop
/// the rest of the batch.
pub async fn run_batch<A, R>(
    api: &A,
    reporter: &mut R,
    names: &[String],
    poll_interval: Duration,
) -> BatchReport
where
    A: KnowledgeBaseApi + ?Sized,
    R: Reporter + ?Sized,
{
    let mut report = BatchReport::start();
    info!(run_id = %report.run_id, count = names.len(), "Starting sync batch");
    reporter.report(SyncEvent::BatchStarted {
        knowledge_bases: names.len(),
    });

    for name in names {
        let mut outcome = KbOutcome::new(name.as_str());
        match sync_knowledge_base(api, reporter, name, poll_interval, &mut outcome).await {
            Ok(()) => {
                info!(run_id = %report.run_id, name = %name, "Knowledge base synced");
            }
            Err(e) => {
                warn!(run_id = %report.run_id, name = %name, error = %e, "Knowledge base sync failed");
                reporter.report(SyncEvent::KnowledgeBaseFailed { name, error: &e });
                outcome.error = Some(e.to_string());
            }
        }
        report.outcomes.push(outcome);
    }

    report.finish();
    info!(
        run_id = %report.run_id,
        succeeded = report.succeeded(),
        failed = report.failed(),
        "Sync batch finished"
    );
    report
}

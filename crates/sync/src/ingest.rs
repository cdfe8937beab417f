//! Ingestion job trigger and status poller.

use std::time::Duration;

use tracing::{debug, info};

use kbsync_bedrock::KnowledgeBaseApi;
use kbsync_core::{IngestionJob, SyncError};

use crate::events::{Reporter, SyncEvent};

/// Start one ingestion job for the knowledge-base/data-source pair.
///
/// Not idempotent: each call starts another job. Errors are returned as-is.
pub async fn start_ingestion<A, R>(
    api: &A,
    reporter: &mut R,
    knowledge_base_id: &str,
    data_source_id: &str,
) -> Result<IngestionJob, SyncError>
where
    A: KnowledgeBaseApi + ?Sized,
    R: Reporter + ?Sized,
{
    let job = api
        .start_ingestion_job(knowledge_base_id, data_source_id)
        .await?;

    info!(
        knowledge_base_id,
        data_source_id,
        job_id = %job.job_id,
        status = %job.status,
        "Ingestion job started"
    );
    reporter.report(SyncEvent::IngestionStarted { job: &job });

    Ok(job)
}

/// Poll `job` every `interval` until it reports `COMPLETE` or `FAILED`.
///
/// The first query is issued immediately. There is no iteration cap and no
/// timeout: a job stuck in a non-terminal status keeps this future pending
/// until the process is stopped.
pub async fn wait_for_completion<A, R>(
    api: &A,
    reporter: &mut R,
    job: &IngestionJob,
    interval: Duration,
) -> Result<IngestionJob, SyncError>
where
    A: KnowledgeBaseApi + ?Sized,
    R: Reporter + ?Sized,
{
    let mut polls = 0u64;

    loop {
        let current = api
            .get_ingestion_job(&job.knowledge_base_id, &job.data_source_id, &job.job_id)
            .await?;
        polls += 1;

        debug!(job_id = %job.job_id, status = %current.status, polls, "Polled ingestion job");
        reporter.report(SyncEvent::StatusPolled { job: &current });

        if current.status.is_terminal() {
            info!(job_id = %job.job_id, status = %current.status, polls, "Ingestion job finished");
            reporter.report(SyncEvent::IngestionFinished { job: &current });
            return Ok(current);
        }

        tokio::time::sleep(interval).await;
    }
}

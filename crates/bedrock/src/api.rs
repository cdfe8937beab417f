//! The remote operations the sync workflow depends on.

use async_trait::async_trait;

use kbsync_core::{DataSourceRef, IngestionJob, KnowledgeBaseRef, Page, SyncError};

/// Knowledge-base control-plane operations.
///
/// Listings are exposed page by page; callers own the pagination loop so that
/// a name lookup can stop at the first match. Implementations surface service
/// failures as [`SyncError::Remote`] without retrying.
#[async_trait]
pub trait KnowledgeBaseApi: Send + Sync {
    /// Fetch one page of the account's knowledge bases.
    async fn list_knowledge_bases(
        &self,
        next_token: Option<&str>,
    ) -> Result<Page<KnowledgeBaseRef>, SyncError>;

    /// Fetch one page of the data sources attached to `knowledge_base_id`.
    async fn list_data_sources(
        &self,
        knowledge_base_id: &str,
        next_token: Option<&str>,
    ) -> Result<Page<DataSourceRef>, SyncError>;

    /// Start an ingestion job. Every call starts a new job.
    async fn start_ingestion_job(
        &self,
        knowledge_base_id: &str,
        data_source_id: &str,
    ) -> Result<IngestionJob, SyncError>;

    /// Read the current state of a job by its three-part key.
    async fn get_ingestion_job(
        &self,
        knowledge_base_id: &str,
        data_source_id: &str,
        job_id: &str,
    ) -> Result<IngestionJob, SyncError>;
}

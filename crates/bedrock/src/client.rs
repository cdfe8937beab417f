//! Amazon Bedrock knowledge-base client.
//!
//! Provides [`BedrockAgentClient`], the [`KnowledgeBaseApi`] implementation
//! backed by the AWS SDK `bedrock-agent` client. Credentials come from the
//! SDK's default provider chain; nothing here handles secrets.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockagent::error::DisplayErrorContext;
use tracing::{debug, info};

use kbsync_core::{
    DataSourceRef, IngestionJob, IngestionStatus, KnowledgeBaseRef, Page, SyncConfig, SyncError,
};

use crate::api::KnowledgeBaseApi;

/// Client for the Bedrock knowledge-base control plane.
///
/// Created once at startup and reused for every call of a run.
pub struct BedrockAgentClient {
    client: aws_sdk_bedrockagent::Client,
    region: String,
}

impl BedrockAgentClient {
    /// Create a new [`BedrockAgentClient`] from the given configuration.
    ///
    /// The AWS SDK config is loaded using the region in `config`, the optional
    /// named AWS profile, and the optional endpoint override.
    pub async fn new(config: &SyncConfig) -> Self {
        let region = aws_sdk_bedrockagent::config::Region::new(config.region.clone());
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(ref profile) = config.aws_profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config: aws_types::SdkConfig = loader.load().await;

        let mut builder = aws_sdk_bedrockagent::config::Builder::from(&sdk_config);
        if let Some(ref endpoint) = config.endpoint_url {
            builder = builder.endpoint_url(normalize_endpoint(endpoint));
        }

        let client = aws_sdk_bedrockagent::Client::from_conf(builder.build());

        info!(
            region = %config.region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("(sdk default)"),
            "BedrockAgentClient initialised"
        );

        Self {
            client,
            region: config.region.clone(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl KnowledgeBaseApi for BedrockAgentClient {
    async fn list_knowledge_bases(
        &self,
        next_token: Option<&str>,
    ) -> Result<Page<KnowledgeBaseRef>, SyncError> {
        let resp = self
            .client
            .list_knowledge_bases()
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| sdk_error("ListKnowledgeBases", &e))?;

        let items: Vec<KnowledgeBaseRef> = resp
            .knowledge_base_summaries()
            .iter()
            .map(|kb| KnowledgeBaseRef::new(kb.name(), kb.knowledge_base_id()))
            .collect();

        debug!(count = items.len(), has_more = resp.next_token().is_some(), "Listed knowledge bases");

        Ok(Page {
            items,
            next_token: resp.next_token().map(str::to_string),
        })
    }

    async fn list_data_sources(
        &self,
        knowledge_base_id: &str,
        next_token: Option<&str>,
    ) -> Result<Page<DataSourceRef>, SyncError> {
        let resp = self
            .client
            .list_data_sources()
            .knowledge_base_id(knowledge_base_id)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| sdk_error("ListDataSources", &e))?;

        let items: Vec<DataSourceRef> = resp
            .data_source_summaries()
            .iter()
            .map(|ds| DataSourceRef::new(ds.data_source_id(), Some(ds.name())))
            .collect();

        debug!(
            knowledge_base_id,
            count = items.len(),
            has_more = resp.next_token().is_some(),
            "Listed data sources"
        );

        Ok(Page {
            items,
            next_token: resp.next_token().map(str::to_string),
        })
    }

    async fn start_ingestion_job(
        &self,
        knowledge_base_id: &str,
        data_source_id: &str,
    ) -> Result<IngestionJob, SyncError> {
        const OP: &str = "StartIngestionJob";

        let resp = self
            .client
            .start_ingestion_job()
            .knowledge_base_id(knowledge_base_id)
            .data_source_id(data_source_id)
            .send()
            .await
            .map_err(|e| sdk_error(OP, &e))?;

        convert_job(OP, knowledge_base_id, data_source_id, resp.ingestion_job())
    }

    async fn get_ingestion_job(
        &self,
        knowledge_base_id: &str,
        data_source_id: &str,
        job_id: &str,
    ) -> Result<IngestionJob, SyncError> {
        const OP: &str = "GetIngestionJob";

        let resp = self
            .client
            .get_ingestion_job()
            .knowledge_base_id(knowledge_base_id)
            .data_source_id(data_source_id)
            .ingestion_job_id(job_id)
            .send()
            .await
            .map_err(|e| sdk_error(OP, &e))?;

        convert_job(OP, knowledge_base_id, data_source_id, resp.ingestion_job())
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Render an SDK error with its full source chain; the plain `Display` of
/// `SdkError` is just "service error".
fn sdk_error<E: std::error::Error>(operation: &'static str, err: &E) -> SyncError {
    SyncError::remote(operation, DisplayErrorContext(err).to_string())
}

fn convert_job(
    operation: &'static str,
    knowledge_base_id: &str,
    data_source_id: &str,
    job: Option<&aws_sdk_bedrockagent::types::IngestionJob>,
) -> Result<IngestionJob, SyncError> {
    let job = job.ok_or(SyncError::MalformedResponse {
        operation,
        field: "ingestionJob",
    })?;

    Ok(IngestionJob {
        knowledge_base_id: knowledge_base_id.to_string(),
        data_source_id: data_source_id.to_string(),
        job_id: job.ingestion_job_id().to_string(),
        status: IngestionStatus::from(job.status().as_str()),
        failure_reasons: job.failure_reasons().to_vec(),
    })
}

/// Accept endpoints given with or without a scheme.
fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    }
}

// ---------------------------------------------------------------------------
// Tests — conversion logic only, no AWS calls
// ---------------------------------------------------------------------------

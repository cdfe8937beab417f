//! Per-run outcome records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use kbsync_core::{DataSourceRef, IngestionJob, IngestionStatus};

/// What happened to one data source of a knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSourceOutcome {
    pub data_source_id: String,
    pub name: String,
    /// Set once the job was started.
    pub job_id: Option<String>,
    /// Last status observed, terminal unless processing stopped on an error.
    pub status: Option<IngestionStatus>,
}

impl DataSourceOutcome {
    pub fn pending(data_source: &DataSourceRef) -> Self {
        Self {
            data_source_id: data_source.id.clone(),
            name: data_source.name.clone(),
            job_id: None,
            status: None,
        }
    }

    pub fn record(&mut self, job: &IngestionJob) {
        self.job_id = Some(job.job_id.clone());
        self.status = Some(job.status.clone());
    }
}

/// What happened to one requested knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KbOutcome {
    pub name: String,
    pub knowledge_base_id: Option<String>,
    pub data_sources: Vec<DataSourceOutcome>,
    /// Message of the error that stopped processing, if any.
    pub error: Option<String>,
}

impl KbOutcome {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            knowledge_base_id: None,
            data_sources: Vec::new(),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Data sources whose ingestion job ended `FAILED`.
    pub fn failed_jobs(&self) -> usize {
        self.data_sources
            .iter()
            .filter(|ds| ds.status == Some(IngestionStatus::Failed))
            .count()
    }
}

/// Aggregated result of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub outcomes: Vec<KbOutcome>,
}

impl BatchReport {
    pub fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            outcomes: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn summary_line(&self) -> String {
        let failed_jobs: usize = self.outcomes.iter().map(KbOutcome::failed_jobs).sum();
        let mut line = format!(
            "{} knowledge base(s) synced, {} failed",
            self.succeeded(),
            self.failed()
        );
        if failed_jobs > 0 {
            line.push_str(&format!("; {failed_jobs} ingestion job(s) ended FAILED"));
        }
        line
    }
}

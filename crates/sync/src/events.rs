//! Progress events emitted while a batch runs.
//!
//! The workflow never writes to the console itself; it hands each step to a
//! [`Reporter`]. The `Display` impl gives the plain-text progress line.

use std::fmt;

use kbsync_core::{DataSourceRef, IngestionJob, KnowledgeBaseRef, SyncError};

#[derive(Debug, Clone, Copy)]
pub enum SyncEvent<'a> {
    /// Names are collected and discovery begins.
    BatchStarted { knowledge_bases: usize },
    KnowledgeBaseStarted { name: &'a str },
    KnowledgeBaseResolved { knowledge_base: &'a KnowledgeBaseRef },
    DataSourcesFound { knowledge_base_id: &'a str, count: usize },
    DataSourceStarted { data_source: &'a DataSourceRef },
    IngestionStarted { job: &'a IngestionJob },
    StatusPolled { job: &'a IngestionJob },
    /// The job reached `COMPLETE` or `FAILED`.
    IngestionFinished { job: &'a IngestionJob },
    /// Processing of this knowledge base stopped on an error.
    KnowledgeBaseFailed { name: &'a str, error: &'a SyncError },
}

impl SyncEvent<'_> {
    /// Whether the line closes a block and is followed by a blank line.
    pub fn ends_block(&self) -> bool {
        matches!(
            self,
            Self::BatchStarted { .. }
                | Self::DataSourcesFound { .. }
                | Self::IngestionFinished { .. }
                | Self::KnowledgeBaseFailed { .. }
        )
    }
}

impl fmt::Display for SyncEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BatchStarted { .. } => {
                write!(f, "🔍 Discovering Knowledge Bases & Data Sources...")
            }
            Self::KnowledgeBaseStarted { name } => write!(f, "📘 KB: {name}"),
            Self::KnowledgeBaseResolved { knowledge_base } => {
                write!(f, "   ↳ KB ID: {}", knowledge_base.id)
            }
            Self::DataSourcesFound { count, .. } => {
                write!(f, "   ↳ Found {count} data source(s)")
            }
            Self::DataSourceStarted { data_source } => write!(
                f,
                "🚀 Syncing Data Source: {} ({})",
                data_source.name, data_source.id
            ),
            Self::IngestionStarted { job } => write!(
                f,
                "✅ Ingestion started (DS: {}, Job: {})",
                job.data_source_id, job.job_id
            ),
            Self::StatusPolled { job } => {
                write!(f, "⏳ Status (DS: {}): {}", job.data_source_id, job.status)
            }
            Self::IngestionFinished { job } => {
                write!(f, "🎯 Final status (DS: {}): {}", job.data_source_id, job.status)?;
                if !job.failure_reasons.is_empty() {
                    write!(f, " ({})", job.failure_reasons.join("; "))?;
                }
                Ok(())
            }
            Self::KnowledgeBaseFailed { name, error } => {
                write!(f, "❌ Failed for KB '{name}': {error}")
            }
        }
    }
}

/// Receives progress events from the workflow.
pub trait Reporter {
    fn report(&mut self, event: SyncEvent<'_>);
}

/// Reporter that records rendered lines, handy for tests and logs.
impl Reporter for Vec<String> {
    fn report(&mut self, event: SyncEvent<'_>) {
        self.push(event.to_string());
    }
}

//! Transient records handled during one sync run.
//!
//! Nothing here is persisted: knowledge bases and data sources are looked up
//! fresh from the service each run, and jobs live only until they reach a
//! terminal status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display name used when the service reports a data source without one.
pub const UNNAMED_DATA_SOURCE: &str = "Unnamed";

/// A knowledge base resolved from its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBaseRef {
    pub name: String,
    pub id: String,
}

impl KnowledgeBaseRef {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// A data source attached to a knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceRef {
    pub id: String,
    pub name: String,
}

impl DataSourceRef {
    /// Build a data source record, substituting [`UNNAMED_DATA_SOURCE`] for a
    /// missing or empty name.
    pub fn new(id: impl Into<String>, name: Option<&str>) -> Self {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_DATA_SOURCE)
            .to_string();
        Self { id: id.into(), name }
    }
}

/// Ingestion job status as reported by the service.
///
/// Only [`Complete`](Self::Complete) and [`Failed`](Self::Failed) are
/// terminal. `STOPPED` is not: a stopped job keeps the poller waiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IngestionStatus {
    Starting,
    InProgress,
    Complete,
    Failed,
    Stopping,
    Stopped,
    /// Any value this build does not know about.
    Other(String),
}

impl IngestionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Starting => "STARTING",
            Self::InProgress => "IN_PROGRESS",
            Self::Complete => "COMPLETE",
            Self::Failed => "FAILED",
            Self::Stopping => "STOPPING",
            Self::Stopped => "STOPPED",
            Self::Other(s) => s,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

impl From<&str> for IngestionStatus {
    fn from(s: &str) -> Self {
        match s {
            "STARTING" => Self::Starting,
            "IN_PROGRESS" => Self::InProgress,
            "COMPLETE" => Self::Complete,
            "FAILED" => Self::Failed,
            "STOPPING" => Self::Stopping,
            "STOPPED" => Self::Stopped,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for IngestionStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<IngestionStatus> for String {
    fn from(status: IngestionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for IngestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ingestion job started for one knowledge-base/data-source pair.
///
/// Status queries must use the same three-part key that produced the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionJob {
    pub knowledge_base_id: String,
    pub data_source_id: String,
    pub job_id: String,
    pub status: IngestionStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failure_reasons: Vec<String>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    pub fn with_next(items: Vec<T>, token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(token.into()),
        }
    }

    /// Token for the following page; an empty token counts as the end.
    pub fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Knowledge Base with name '{name}' not found")]
    NotFound { name: String },

    #[error("No data sources found for KB {knowledge_base_id}")]
    NoDataSources { knowledge_base_id: String },

    /// An AWS SDK error, rendered with its full source chain.
    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} response is missing {field}")]
    MalformedResponse {
        operation: &'static str,
        field: &'static str,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            message: message.into(),
        }
    }

    /// True for errors that originate from the remote service rather than
    /// from local input or lookups.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. } | Self::MalformedResponse { .. })
    }
}

//! Knowledge-base sync workflow: resolve names, enumerate data sources,
//! start one ingestion job per data source and wait for each to finish.

pub mod driver;
pub mod events;
pub mod ingest;
pub mod prompt;
pub mod report;
pub mod resolve;

pub use driver::{read_batch, run_batch, sync_knowledge_base};
pub use events::{Reporter, SyncEvent};
pub use ingest::{start_ingestion, wait_for_completion};
pub use prompt::Prompter;
pub use report::{BatchReport, DataSourceOutcome, KbOutcome};
pub use resolve::{find_knowledge_base, list_data_sources};

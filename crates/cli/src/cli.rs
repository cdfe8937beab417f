use std::path::PathBuf;

use clap::Parser;
use kbsync_core::SyncConfig;

/// Trigger ingestion for Bedrock knowledge bases and wait for each job.
///
/// Without `--kb`, asks how many knowledge bases to sync and then for each
/// name. Every data source of each knowledge base is synced in turn.
#[derive(Parser, Debug)]
#[command(name = "kb-sync", version, about = "Sync Bedrock knowledge base data sources")]
pub struct CliArgs {
    /// Knowledge base name to sync (repeatable). Skips the interactive prompts.
    #[arg(long = "kb", value_name = "NAME")]
    pub knowledge_bases: Vec<String>,

    /// Settings file to load instead of searching for `.env`
    #[arg(long, env = "KBSYNC_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Settings profile: reads `{PROFILE}_{KEY}` before `{KEY}` (default: $KBSYNC_PROFILE)
    #[arg(long)]
    pub profile: Option<String>,

    /// AWS region of the knowledge bases
    #[arg(long)]
    pub region: Option<String>,

    /// Endpoint override for the bedrock-agent API
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Named profile from the shared AWS config files
    #[arg(long)]
    pub aws_profile: Option<String>,

    /// Seconds between status checks of a running job
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: Option<u64>,

    /// Print the batch report as JSON when done
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Build the config from the environment, then apply flag overrides.
    pub fn resolve_config(&self) -> SyncConfig {
        let mut config = match self.profile {
            Some(ref profile) => SyncConfig::from_env_profiled(profile),
            None => SyncConfig::from_env(),
        };
        self.apply_overrides(&mut config);
        config
    }

    pub fn apply_overrides(&self, config: &mut SyncConfig) {
        if let Some(ref region) = self.region {
            config.region = region.clone();
        }
        if let Some(ref endpoint) = self.endpoint_url {
            config.endpoint_url = Some(endpoint.clone());
        }
        if let Some(ref profile) = self.aws_profile {
            config.aws_profile = Some(profile.clone());
        }
        if let Some(secs) = self.poll_interval {
            config.poll_interval_secs = secs;
        }
    }
}

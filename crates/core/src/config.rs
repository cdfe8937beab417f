use std::env;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Region used when neither `BEDROCK_REGION` nor `AWS_REGION` is set.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Seconds between two status queries of the same ingestion job.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Load a `.env` file.
///
/// With no explicit path, `.env` is searched from the current directory
/// upwards and silently ignored if missing. An explicit path must exist.
pub fn load_dotenv(path: Option<&Path>) -> Result<(), SyncError> {
    match path {
        Some(p) => dotenvy::from_path(p)
            .map_err(|e| SyncError::Config(format!("failed to load {}: {e}", p.display()))),
        None => {
            dotenvy::dotenv().ok();
            Ok(())
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

// ── SyncConfig ────────────────────────────────────────────────

/// Runtime settings for a sync run.
///
/// Profile is read from `KBSYNC_PROFILE`. When set (e.g. `PROD`), every key is
/// first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Active profile name (empty = default).
    pub profile: String,
    /// AWS region of the knowledge bases.
    pub region: String,
    /// Endpoint override for the bedrock-agent API (local stubs, VPC endpoints).
    pub endpoint_url: Option<String>,
    /// Named profile from the shared AWS config files.
    pub aws_profile: Option<String>,
    pub poll_interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            profile: String::new(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            aws_profile: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl SyncConfig {
    /// Build config from environment variables (call [`load_dotenv`] first).
    pub fn from_env() -> Self {
        let profile = env_opt("KBSYNC_PROFILE").unwrap_or_default();
        Self::from_env_profiled(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    ///
    /// `BEDROCK_REGION` falls back to `AWS_REGION` before using the default.
    pub fn from_env_profiled(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();

        let region = profiled_env_opt(p, "BEDROCK_REGION")
            .or_else(|| profiled_env_opt(p, "AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Self {
            profile: p.to_string(),
            region,
            endpoint_url: profiled_env_opt(p, "BEDROCK_ENDPOINT_URL"),
            aws_profile: profiled_env_opt(p, "AWS_PROFILE"),
            poll_interval_secs: profiled_env_u64(
                p,
                "KBSYNC_POLL_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            ),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    pub fn log_summary(&self) {
        tracing::info!(
            profile = self.profile_label(),
            region = %self.region,
            endpoint = self.endpoint_url.as_deref().unwrap_or("(sdk default)"),
            aws_profile = self.aws_profile.as_deref().unwrap_or("(default chain)"),
            poll_interval_secs = self.poll_interval_secs,
            "Config loaded"
        );
    }
}

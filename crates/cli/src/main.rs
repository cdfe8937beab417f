mod cli;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use kbsync_bedrock::BedrockAgentClient;
use kbsync_core::config::load_dotenv;
use kbsync_core::SyncError;
use kbsync_sync::{read_batch, run_batch};

use crate::cli::CliArgs;
use crate::terminal::Terminal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries the progress lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    load_dotenv(args.env_file.as_deref()).context("failed to load settings file")?;
    let config = args.resolve_config();
    config.log_summary();

    let client = BedrockAgentClient::new(&config).await;
    let mut terminal = Terminal::new(args.no_color);

    let names = if args.knowledge_bases.is_empty() {
        match read_batch(&mut terminal) {
            Ok(names) => names,
            Err(SyncError::InvalidInput(message)) => {
                terminal.print_info(&message)?;
                return Ok(());
            }
            Err(e) => return Err(e).context("failed to read knowledge base names"),
        }
    } else {
        args.knowledge_bases.clone()
    };

    info!(count = names.len(), region = client.region(), "Syncing knowledge bases");
    let report = run_batch(&client, &mut terminal, &names, config.poll_interval()).await;

    terminal.print_summary(&report)?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    }

    Ok(())
}

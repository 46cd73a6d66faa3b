//! hook-replay - feed recorded call outcomes through the post-call hooks
//!
//! Reads JSON-lines `CallOutcome` records from a file or stdin, runs each one
//! through the billing and alerting hooks, then waits for the detached
//! deliveries to finish.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use litellm_hooks::utils::logging::init_logging;
use litellm_hooks::{AlertDecision, CallOutcome, Config, HookDispatcher};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "hook-replay", version, about = "Replay call outcomes through the post-call hooks")]
struct Args {
    /// YAML configuration file; environment variables are used when omitted
    #[arg(short, long, env = "HOOKS_CONFIG")]
    config: Option<PathBuf>,

    /// JSON-lines file of call outcomes; stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Maximum seconds to wait for in-flight reports and alerts before exiting
    #[arg(long, default_value_t = 5)]
    drain_secs: u64,

    /// Log filter, e.g. `info` or `litellm_hooks=debug`
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Default)]
struct ReplayStats {
    replayed: usize,
    alerted: usize,
    skipped: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref(), args.json_logs)?;

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::from_env().context("loading configuration from environment")?,
    };
    let dispatcher = HookDispatcher::from_config(&config)
        .await
        .context("building hook dispatcher")?;

    let stats = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            replay(&dispatcher, BufReader::new(file)).await?
        }
        None => replay(&dispatcher, BufReader::new(tokio::io::stdin())).await?,
    };

    info!(
        replayed = stats.replayed,
        alerted = stats.alerted,
        skipped = stats.skipped,
        "Replay finished, draining deliveries"
    );
    if dispatcher.drain(Duration::from_secs(args.drain_secs)).await {
        info!("All deliveries finished");
    } else {
        warn!(
            drain_secs = args.drain_secs,
            "Drain period elapsed with deliveries still in flight"
        );
    }

    Ok(())
}

async fn replay<R>(dispatcher: &HookDispatcher, reader: R) -> anyhow::Result<ReplayStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = ReplayStats::default();
    let mut lines = reader.lines();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line().await.context("reading input")? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        let outcome: CallOutcome = match serde_json::from_str(&line) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(line = line_number, error = %e, "Skipping malformed call outcome");
                stats.skipped += 1;
                continue;
            }
        };

        if let AlertDecision::Dispatched(event) = dispatcher.post_call_hook(outcome) {
            info!(line = line_number, alert_id = %event.id, "Slow response alert raised");
            stats.alerted += 1;
        }
        stats.replayed += 1;
    }

    Ok(stats)
}

//! Field hooks in rich-text blocks: scenario runner
//!
//! Creates, reads and duplicates a `posts` document (relationship field at the
//! top level) and an `articles` document (the same field inside a
//! `category-block` embedded in rich text), then reports which field hooks
//! fired for each operation.
//!
//! Usage:
//!   blockhook-repro --failure-mode continue --json

use anyhow::{Context, Result};
use blockhook_dispatch::{DispatchConfig, FailureMode};
use blockhook_repro::{fixtures, run_all};
use blockhook_runtime::ContentRuntime;
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "blockhook-repro")]
#[command(about = "Report which field hooks fire for top-level and block-nested fields")]
struct Args {
    /// Path to a TOML file with a [dispatch] table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured hook failure mode (abort | continue)
    #[arg(long)]
    failure_mode: Option<FailureMode>,

    /// Print the report as JSON, including the per-operation call logs
    #[arg(long)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = match &args.config {
        Some(path) => DispatchConfig::try_load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DispatchConfig::default(),
    };
    if let Some(mode) = args.failure_mode {
        config.failure_mode = mode;
    }
    info!(
        "Dispatch config: failure-mode={}, max-depth={}",
        config.failure_mode, config.max_depth
    );

    let registry = fixtures::registry().context("Fixture schema is invalid")?;
    let runtime = ContentRuntime::in_memory(registry, config);
    let report = run_all(&runtime);

    if args.json {
        let out = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", out);
    } else {
        print!("{}", report);
    }

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}

// ABOUTME: Collector binary polling LibreLinkUp on a fixed interval and printing metrics
// ABOUTME: Environment configuration with CLI overrides, stops cleanly on Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LibreLinkUp Collector Binary
//!
//! Logs in once at startup (failure is fatal), then runs one gather cycle per
//! interval tick. Cycle failures are logged and the next tick starts fresh.

use anyhow::{Context, Result};
use clap::Parser;
use librelinkup_collector::{
    collector::Collector,
    config::CollectorConfig,
    logging,
    sink::{LineSink, OutputFormat},
};
use librelinkup_core::constants::timeouts;
use std::io;
use std::time::Duration;
use tracing::{error, info};

/// Command-line overrides for the collector
#[derive(Parser)]
#[command(name = "librelinkup-collector")]
#[command(about = "Poll the LibreLinkUp backend for the latest glucose reading")]
pub struct Args {
    /// Override LIBRELINKUP_REGION
    #[arg(long)]
    region: Option<String>,

    /// Override LIBRELINKUP_PATIENT_ID
    #[arg(long)]
    patient_id: Option<String>,

    /// Override LIBRELINKUP_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Seconds between poll cycles
    #[arg(long, default_value_t = timeouts::DEFAULT_POLL_INTERVAL_SECS)]
    interval_secs: u64,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Output encoding for metrics written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::LineProtocol)]
    format: OutputFormat,

    /// Print the sample configuration and exit
    #[arg(long)]
    sample_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.sample_config {
        print!("{}", Collector::sample_config());
        return Ok(());
    }

    logging::init_from_env()?;

    let mut config = CollectorConfig::from_env().context("failed to load configuration")?;
    if let Some(region) = args.region {
        config.region = region;
    }
    if let Some(patient_id) = args.patient_id {
        config = config.with_patient_id(patient_id);
    }
    if let Some(api_url) = args.api_url {
        config = config.with_api_url(api_url);
    }
    info!("{}", config.summary());

    let mut collector = Collector::new(config).context("failed to configure collector")?;
    if let Err(e) = collector.init().await {
        error!(error = %e, kind = ?e.kind(), "{}", e.kind().description());
        return Err(e).context("collector initialization failed");
    }

    let mut sink = LineSink::new(io::stdout(), args.format);

    if args.once {
        collector.gather(&mut sink).await?;
        return Ok(());
    }

    let period = Duration::from_secs(args.interval_secs.max(1));
    collector.run_until(&mut sink, period, ctrl_c()).await;

    Ok(())
}

/// Resolves on the first Ctrl-C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

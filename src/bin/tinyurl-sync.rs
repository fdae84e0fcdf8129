//! TinyURL Sync Binary
//!
//! Runs one reconciliation pass and exits. Scheduling is left to cron or
//! whatever invokes the process.

use anyhow::Context;
use tracing::info;

use tinyurl_sync::{job, logging, SyncConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_structured_logging();

    let config = SyncConfig::from_env().context("Failed to load configuration")?;
    let summary = job::run(&config).await?;

    info!(
        total = summary.total(),
        succeeded = summary.succeeded(),
        invalid = summary.invalid(),
        creation_failed = summary.creation_failed(),
        faulted = summary.faulted(),
        "TinyURL sync finished"
    );
    Ok(())
}

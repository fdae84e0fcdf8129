//! # Sync Job
//!
//! One run of the job: check credentials, open the HTTP session, fetch the
//! batch once and reconcile it. The session lives only for the duration of
//! [`run`].

use std::sync::Arc;
use tracing::{error, info};

use crate::clients::{build_http_session, AirtableClient, RecordSource, TinyUrlClient};
use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::reconciler::{gate_for, BatchSummary, Reconciler};

/// Run the job against the live services described by `config`.
///
/// Missing credentials are reported before any network activity.
pub async fn run(config: &SyncConfig) -> SyncResult<BatchSummary> {
    info!("Starting TinyURL sync job");

    let credentials = config.credentials().inspect_err(|e| error!("{e}"))?;

    let session = build_http_session(config.http_timeout)?;
    let airtable = Arc::new(AirtableClient::new(
        session.clone(),
        &config.airtable,
        credentials.airtable_api_key,
    )?);
    let tinyurl = Arc::new(TinyUrlClient::new(
        session,
        &config.tinyurl,
        &credentials.tinyurl_api_token,
    )?);

    let reconciler = Reconciler::new(
        tinyurl,
        airtable.clone(),
        gate_for(config.pacing_interval),
        config.airtable.fields.clone(),
    );

    run_batch(airtable.as_ref(), &reconciler).await
}

/// Fetch the batch once and hand it to the reconciler
pub async fn run_batch(
    source: &dyn RecordSource,
    reconciler: &Reconciler,
) -> SyncResult<BatchSummary> {
    let records = source.fetch_candidates().await?;
    info!("Fetched {} records from Airtable", records.len());

    let summary = reconciler.reconcile(&records).await;
    info!(
        processed = summary.total(),
        succeeded = summary.succeeded(),
        "Cron job completed"
    );
    Ok(summary)
}

//! # External Service Clients
//!
//! The job talks to two HTTP services: the record store (Airtable) and the
//! URL shortener (TinyURL). Each capability the reconciler needs is a trait so
//! the loop can run against in-memory implementations in tests.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

use crate::error::{SyncError, SyncResult};
use crate::models::{AliasRequest, Record, RecordId};

pub mod airtable;
pub mod tinyurl;

pub use airtable::AirtableClient;
pub use tinyurl::TinyUrlClient;

/// Supplies the batch of candidate records for one run
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every record visible in the configured view.
    ///
    /// A non-success response from the store yields an empty batch; only
    /// transport or decoding faults are returned as errors.
    async fn fetch_candidates(&self) -> SyncResult<Vec<Record>>;
}

/// Registers permanent short aliases
#[async_trait]
pub trait AliasCreator: Send + Sync {
    /// `Ok(true)` when the alias was created, `Ok(false)` when the service
    /// answered with anything other than success.
    async fn create_alias(&self, request: &AliasRequest) -> SyncResult<bool>;
}

/// Persists the outcome string onto a record
#[async_trait]
pub trait StatusWriter: Send + Sync {
    async fn write_status(&self, record_id: &RecordId, message: &str) -> SyncResult<bool>;
}

/// Build the HTTP session shared by both clients for the length of a run
pub fn build_http_session(timeout: Duration) -> SyncResult<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(format!("tinyurl-sync/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SyncError::configuration(format!("Failed to create HTTP client: {e}")))?;

    debug!(timeout_ms = timeout.as_millis() as u64, "Created HTTP session");
    Ok(client)
}

/// Parse `base` and append `segments` as percent-encoded path segments
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> SyncResult<Url> {
    let mut url = Url::parse(base).map_err(|e| SyncError::invalid_url(base, e))?;
    url.path_segments_mut()
        .map_err(|()| SyncError::invalid_url(base, "URL cannot be a base"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # TinyURL Sync
//!
//! Batch job that keeps records in an Airtable view in step with TinyURL:
//! every eligible record gets a permanent `kb-<slug>` alias for its long URL
//! and the outcome is written back to the record's status field.
//!
//! ## Module Organization
//!
//! - [`config`] - Explicit job configuration built from the environment
//! - [`clients`] - Airtable and TinyURL HTTP clients behind small traits
//! - [`reconciler`] - The per-record state machine and rate gate
//! - [`job`] - One complete run: credentials, session, fetch, reconcile
//! - [`models`] - Records and alias requests
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tinyurl_sync::{job, SyncConfig};
//!
//! # tokio_test::block_on(async {
//! let config = SyncConfig::from_env()?;
//! let summary = job::run(&config).await?;
//! println!("{} of {} records succeeded", summary.succeeded(), summary.total());
//! # Ok::<(), tinyurl_sync::SyncError>(())
//! # }).unwrap();
//! ```

pub mod clients;
pub mod config;
pub mod constants;
pub mod error;
pub mod job;
pub mod logging;
pub mod models;
pub mod reconciler;

pub use clients::{AliasCreator, RecordSource, StatusWriter};
pub use config::{FieldMapping, SyncConfig};
pub use error::{SyncError, SyncResult};
pub use models::{AliasRequest, Record, RecordId};
pub use reconciler::{BatchSummary, Reconciler, RecordOutcome};

//! # Reconciler
//!
//! Walks a fetched batch in order and drives each record to exactly one
//! terminal [`RecordOutcome`]:
//!
//! ```text
//! Pending ─┬─ missing slug/url ──────────────► Invalid
//!          └─ gate ─ create alias ─┬─ true ──► Succeeded
//!                                  ├─ false ─► CreationFailed
//!                                  └─ error ─► Faulted { cause }
//! ```
//!
//! The outcome's status message is written back to the record. A failure of
//! one record never stops the batch.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::{AliasCreator, StatusWriter};
use crate::config::FieldMapping;
use crate::error::SyncResult;
use crate::logging::{log_error, log_record_operation};
use crate::models::{AliasRequest, Record, RecordId};

pub mod outcome;
pub mod pacing;

pub use outcome::{BatchSummary, RecordOutcome};
pub use pacing::{gate_for, FixedIntervalGate, NoopGate, RateGate};

pub struct Reconciler {
    aliases: Arc<dyn AliasCreator>,
    statuses: Arc<dyn StatusWriter>,
    gate: Arc<dyn RateGate>,
    fields: FieldMapping,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    pub fn new(
        aliases: Arc<dyn AliasCreator>,
        statuses: Arc<dyn StatusWriter>,
        gate: Arc<dyn RateGate>,
        fields: FieldMapping,
    ) -> Self {
        Self {
            aliases,
            statuses,
            gate,
            fields,
        }
    }

    /// Process every record in fetch order, one at a time
    pub async fn reconcile(&self, records: &[Record]) -> BatchSummary {
        let total = records.len();
        let mut summary = BatchSummary::default();

        for (index, record) in records.iter().enumerate() {
            let name = record.display_name(&self.fields);
            info!(
                record_id = %record.id,
                "Processing {}/{}: {}",
                index + 1,
                total,
                name
            );

            let outcome = self.reconcile_record(record, &name).await;
            summary.push(record.id.clone(), outcome);
        }

        info!(
            total = summary.total(),
            succeeded = summary.succeeded(),
            invalid = summary.invalid(),
            creation_failed = summary.creation_failed(),
            faulted = summary.faulted(),
            "Batch reconciled"
        );
        summary
    }

    /// Drive one record to its terminal state and report it
    pub async fn reconcile_record(&self, record: &Record, name: &str) -> RecordOutcome {
        match self.classify_and_report(record).await {
            Ok(outcome) => {
                match &outcome {
                    RecordOutcome::Succeeded => {
                        info!(record_id = %record.id, "Successfully created TinyURL for {name}");
                    }
                    RecordOutcome::CreationFailed => {
                        error!(record_id = %record.id, "TinyURL creation failed for {name}");
                    }
                    RecordOutcome::Invalid => {
                        warn!(
                            record_id = %record.id,
                            "Skipping {name}: missing {} or {}",
                            self.fields.key,
                            self.fields.url
                        );
                    }
                    RecordOutcome::Faulted { .. } => {}
                }
                log_record_operation(
                    "reconcile",
                    record.id.as_str(),
                    name,
                    outcome.label(),
                    None,
                );
                outcome
            }
            Err(fault) => {
                let outcome = RecordOutcome::Faulted {
                    cause: fault.to_string(),
                };
                error!(record_id = %record.id, error = %fault, "Error processing {name}");
                self.report_best_effort(&record.id, &outcome).await;
                log_record_operation(
                    "reconcile",
                    record.id.as_str(),
                    name,
                    outcome.label(),
                    Some(&fault.to_string()),
                );
                outcome
            }
        }
    }

    async fn classify_and_report(&self, record: &Record) -> SyncResult<RecordOutcome> {
        let outcome = self.classify(record).await?;
        self.statuses
            .write_status(&record.id, &outcome.status_message(&self.fields))
            .await?;
        Ok(outcome)
    }

    async fn classify(&self, record: &Record) -> SyncResult<RecordOutcome> {
        let Some(request) = AliasRequest::from_record(record, &self.fields) else {
            return Ok(RecordOutcome::Invalid);
        };

        self.gate.acquire().await;
        if self.aliases.create_alias(&request).await? {
            Ok(RecordOutcome::Succeeded)
        } else {
            Ok(RecordOutcome::CreationFailed)
        }
    }

    /// Write a fault status; a failure here is logged and dropped
    async fn report_best_effort(&self, record_id: &RecordId, outcome: &RecordOutcome) {
        let message = outcome.status_message(&self.fields);
        match self.statuses.write_status(record_id, &message).await {
            Ok(_) => {}
            Err(e) => log_error(
                "reconciler",
                "write_fault_status",
                &e.to_string(),
                Some(record_id.as_str()),
            ),
        }
    }
}

//! Per-record outcome of a reconciliation pass and the batch summary.

use crate::config::FieldMapping;
use crate::constants::status;
use crate::models::RecordId;

/// Terminal state of one record's pass through the reconciler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Alias created and status written
    Succeeded,
    /// Slug or target URL missing; no alias call was made
    Invalid,
    /// The shortener answered with a non-success response
    CreationFailed,
    /// An error surfaced while creating the alias or writing the status
    Faulted { cause: String },
}

impl RecordOutcome {
    /// Text written to the record's status field
    pub fn status_message(&self, fields: &FieldMapping) -> String {
        match self {
            RecordOutcome::Succeeded => status::TINYURL_VALID.to_string(),
            RecordOutcome::Invalid => format!(
                "{}missing {} or {}",
                status::ERROR_PREFIX,
                fields.key,
                fields.url
            ),
            RecordOutcome::CreationFailed => status::CREATION_FAILED.to_string(),
            RecordOutcome::Faulted { cause } => format!("{}{cause}", status::ERROR_PREFIX),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordOutcome::Succeeded => "succeeded",
            RecordOutcome::Invalid => "invalid",
            RecordOutcome::CreationFailed => "creation_failed",
            RecordOutcome::Faulted { .. } => "faulted",
        }
    }
}

/// Outcomes of one batch run, in fetch order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub outcomes: Vec<(RecordId, RecordOutcome)>,
}

impl BatchSummary {
    pub fn push(&mut self, record_id: RecordId, outcome: RecordOutcome) {
        self.outcomes.push((record_id, outcome));
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Succeeded))
    }

    pub fn invalid(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Invalid))
    }

    pub fn creation_failed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::CreationFailed))
    }

    pub fn faulted(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Faulted { .. }))
    }

    pub fn outcome_for(&self, record_id: &RecordId) -> Option<&RecordOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| id == record_id)
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, predicate: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| predicate(o)).count()
    }
}

//! In-memory implementations of the record source, alias creator, status
//! writer and rate gate. Every call is appended to a shared [`CallLog`] so
//! tests can assert on cross-component ordering.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tinyurl_sync::reconciler::RateGate;
use tinyurl_sync::{
    AliasCreator, AliasRequest, Record, RecordId, RecordSource, StatusWriter, SyncError,
    SyncResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch,
    Gate,
    CreateAlias { slug: String, target_url: String },
    WriteStatus { record_id: String, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn alias_slugs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateAlias { slug, .. } => Some(slug),
                _ => None,
            })
            .collect()
    }

    pub fn status_writes(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::WriteStatus { record_id, message } => Some((record_id, message)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }
}

/// Record source returning a fixed batch, or a fault
pub struct MockSource {
    log: CallLog,
    records: Vec<Record>,
    fault: Option<String>,
}

impl MockSource {
    pub fn new(log: &CallLog, records: Vec<Record>) -> Self {
        Self {
            log: log.clone(),
            records,
            fault: None,
        }
    }

    pub fn failing(log: &CallLog, message: &str) -> Self {
        Self {
            log: log.clone(),
            records: Vec::new(),
            fault: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl RecordSource for MockSource {
    async fn fetch_candidates(&self) -> SyncResult<Vec<Record>> {
        self.log.push(Call::Fetch);
        match &self.fault {
            Some(message) => Err(SyncError::api(500, message.clone())),
            None => Ok(self.records.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AliasResponse {
    Created,
    Rejected,
    Fault(String),
}

/// Alias creator answering per slug; unknown slugs are created
pub struct MockAliasCreator {
    log: CallLog,
    responses: HashMap<String, AliasResponse>,
}

impl MockAliasCreator {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            responses: HashMap::new(),
        }
    }

    pub fn respond(mut self, slug: &str, response: AliasResponse) -> Self {
        self.responses.insert(slug.to_string(), response);
        self
    }
}

#[async_trait]
impl AliasCreator for MockAliasCreator {
    async fn create_alias(&self, request: &AliasRequest) -> SyncResult<bool> {
        self.log.push(Call::CreateAlias {
            slug: request.slug.clone(),
            target_url: request.target_url.clone(),
        });
        match self.responses.get(&request.slug) {
            None | Some(AliasResponse::Created) => Ok(true),
            Some(AliasResponse::Rejected) => Ok(false),
            Some(AliasResponse::Fault(message)) => Err(SyncError::api(503, message.clone())),
        }
    }
}

#[derive(Debug, Clone)]
pub enum WriteResponse {
    Accepted,
    Rejected,
    /// Every write for the record faults
    Fault(String),
    /// Only the first write for the record faults
    FaultOnce(String),
}

/// Status writer answering per record id; unknown ids are accepted
pub struct MockStatusWriter {
    log: CallLog,
    responses: HashMap<String, WriteResponse>,
    attempts: Mutex<HashMap<String, usize>>,
}

impl MockStatusWriter {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            responses: HashMap::new(),
            attempts: Mutex::new(HashMap::new()),
        }
    }

    pub fn respond(mut self, record_id: &str, response: WriteResponse) -> Self {
        self.responses.insert(record_id.to_string(), response);
        self
    }
}

#[async_trait]
impl StatusWriter for MockStatusWriter {
    async fn write_status(&self, record_id: &RecordId, message: &str) -> SyncResult<bool> {
        self.log.push(Call::WriteStatus {
            record_id: record_id.to_string(),
            message: message.to_string(),
        });

        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let n = attempts.entry(record_id.to_string()).or_insert(0);
            *n += 1;
            *n
        };

        match self.responses.get(record_id.as_str()) {
            None | Some(WriteResponse::Accepted) => Ok(true),
            Some(WriteResponse::Rejected) => Ok(false),
            Some(WriteResponse::Fault(message)) => Err(SyncError::api(500, message.clone())),
            Some(WriteResponse::FaultOnce(message)) if attempt == 1 => {
                Err(SyncError::api(500, message.clone()))
            }
            Some(WriteResponse::FaultOnce(_)) => Ok(true),
        }
    }
}

/// Gate that never waits but records each permit
pub struct RecordingGate {
    log: CallLog,
}

impl RecordingGate {
    pub fn new(log: &CallLog) -> Self {
        Self { log: log.clone() }
    }
}

#[async_trait]
impl RateGate for RecordingGate {
    async fn acquire(&self) {
        self.log.push(Call::Gate);
    }
}

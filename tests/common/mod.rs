//! Shared test support for integration tests
#![allow(dead_code)]

pub mod http_stub;
pub mod mock_services;

use serde_json::{Map, Value};
use tinyurl_sync::Record;

/// Build a store record from a JSON object of fields
pub fn record(id: &str, fields: Value) -> Record {
    let fields = match fields {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Record::new(id, fields)
}

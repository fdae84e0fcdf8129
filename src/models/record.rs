//! # Record Model
//!
//! A row of the external store as returned by its list endpoint: a stable
//! identifier plus a loosely typed field map.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::config::FieldMapping;
use crate::constants::defaults;

/// Identifier assigned to a record by the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: RecordId::new(id),
            fields,
        }
    }

    /// Read a field as text.
    ///
    /// Non-blank strings are returned trimmed and numbers are rendered in
    /// decimal. Missing, null, blank, boolean and structured values yield
    /// `None`. The trimmed value is what goes into the alias request, so a
    /// slug or URL with surrounding whitespace is sent without it.
    pub fn text_field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Display label for logs, falling back to a sentinel
    pub fn display_name(&self, fields: &FieldMapping) -> String {
        self.text_field(&fields.name)
            .unwrap_or_else(|| defaults::UNKNOWN_NAME.to_string())
    }
}

/// Long URL and desired slug for one alias creation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRequest {
    pub target_url: String,
    pub slug: String,
}

impl AliasRequest {
    pub fn new(target_url: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            slug: slug.into(),
        }
    }

    /// Build the request from a record, or `None` when either required field
    /// is absent.
    pub fn from_record(record: &Record, fields: &FieldMapping) -> Option<Self> {
        let slug = record.text_field(&fields.key)?;
        let target_url = record.text_field(&fields.url)?;
        Some(Self { target_url, slug })
    }

    /// Public alias registered with the shortener
    pub fn alias(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.slug)
    }
}

//! # Job Configuration
//!
//! Explicit configuration value built once at startup and passed into each
//! component. Values come from the process environment through the `config`
//! crate; tests build the same value from an explicit variable map.

use config::{Config, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::constants::{defaults, env};
use crate::error::{SyncError, SyncResult};

/// Names of the record fields the job reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Display label, only used for logging
    pub name: String,
    /// Slug used to build the alias (`external_key`)
    pub key: String,
    /// Long URL to shorten (`target_url`)
    pub url: String,
    /// Field receiving the outcome status
    pub status: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            name: defaults::NAME_FIELD.to_string(),
            key: defaults::KEY_FIELD.to_string(),
            url: defaults::URL_FIELD.to_string(),
            status: defaults::STATUS_FIELD.to_string(),
        }
    }
}

impl FieldMapping {
    /// Fields requested from the store, in projection order
    pub fn projection(&self) -> [&str; 3] {
        [self.name.as_str(), self.key.as_str(), self.url.as_str()]
    }
}

/// Record store (Airtable) settings
#[derive(Clone)]
pub struct AirtableConfig {
    pub api_url: String,
    pub base_id: String,
    pub table_name: String,
    pub view_name: String,
    pub api_key: Option<String>,
    pub fields: FieldMapping,
}

impl fmt::Debug for AirtableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirtableConfig")
            .field("api_url", &self.api_url)
            .field("base_id", &self.base_id)
            .field("table_name", &self.table_name)
            .field("view_name", &self.view_name)
            .field("api_key_set", &self.api_key.is_some())
            .field("fields", &self.fields)
            .finish()
    }
}

/// Shortening service (TinyURL) settings
#[derive(Clone)]
pub struct TinyUrlConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub domain: String,
    pub alias_prefix: String,
}

impl fmt::Debug for TinyUrlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TinyUrlConfig")
            .field("api_url", &self.api_url)
            .field("api_token_set", &self.api_token.is_some())
            .field("domain", &self.domain)
            .field("alias_prefix", &self.alias_prefix)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub airtable: AirtableConfig,
    pub tinyurl: TinyUrlConfig,
    /// Minimum spacing between alias creation calls
    pub pacing_interval: Duration,
    /// Timeout applied to every outbound request
    pub http_timeout: Duration,
}

/// Both mandatory secrets, present and non-empty
#[derive(Clone)]
pub struct Credentials {
    pub airtable_api_key: String,
    pub tinyurl_api_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials { .. }")
    }
}

/// Flat view of the environment as seen through `config::Environment`,
/// which lowercases variable names.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    airtable_api_url: Option<String>,
    airtable_base_id: Option<String>,
    airtable_table_name: Option<String>,
    airtable_view_name: Option<String>,
    airtable_api_key: Option<String>,
    airtable_name_field: Option<String>,
    airtable_key_field: Option<String>,
    airtable_url_field: Option<String>,
    airtable_status_field: Option<String>,
    tinyurl_api_url: Option<String>,
    tinyurl_api_token: Option<String>,
    tinyurl_domain: Option<String>,
    tinyurl_alias_prefix: Option<String>,
    tinyurl_sync_pacing_ms: Option<String>,
    tinyurl_sync_http_timeout_ms: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            airtable: AirtableConfig {
                api_url: defaults::AIRTABLE_API_URL.to_string(),
                base_id: defaults::AIRTABLE_BASE_ID.to_string(),
                table_name: defaults::AIRTABLE_TABLE_NAME.to_string(),
                view_name: defaults::AIRTABLE_VIEW_NAME.to_string(),
                api_key: None,
                fields: FieldMapping::default(),
            },
            tinyurl: TinyUrlConfig {
                api_url: defaults::TINYURL_API_URL.to_string(),
                api_token: None,
                domain: defaults::TINYURL_DOMAIN.to_string(),
                alias_prefix: defaults::ALIAS_PREFIX.to_string(),
            },
            pacing_interval: Duration::from_millis(defaults::PACING_MS),
            http_timeout: Duration::from_millis(defaults::HTTP_TIMEOUT_MS),
        }
    }
}

impl SyncConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> SyncResult<Self> {
        Self::from_environment(Environment::default())
    }

    /// Load configuration from an explicit set of variables instead of the
    /// process environment
    pub fn from_vars<I, K, V>(vars: I) -> SyncResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_environment(Environment::default().source(Some(source)))
    }

    fn from_environment(environment: Environment) -> SyncResult<Self> {
        let raw: RawSettings = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        let mut config = Self::default();
        let airtable = &mut config.airtable;
        override_with(&mut airtable.api_url, raw.airtable_api_url);
        override_with(&mut airtable.base_id, raw.airtable_base_id);
        override_with(&mut airtable.table_name, raw.airtable_table_name);
        override_with(&mut airtable.view_name, raw.airtable_view_name);
        override_with(&mut airtable.fields.name, raw.airtable_name_field);
        override_with(&mut airtable.fields.key, raw.airtable_key_field);
        override_with(&mut airtable.fields.url, raw.airtable_url_field);
        override_with(&mut airtable.fields.status, raw.airtable_status_field);
        airtable.api_key = non_empty(raw.airtable_api_key);

        let tinyurl = &mut config.tinyurl;
        override_with(&mut tinyurl.api_url, raw.tinyurl_api_url);
        override_with(&mut tinyurl.domain, raw.tinyurl_domain);
        override_with(&mut tinyurl.alias_prefix, raw.tinyurl_alias_prefix);
        tinyurl.api_token = non_empty(raw.tinyurl_api_token);

        if let Some(ms) = parse_millis("TINYURL_SYNC_PACING_MS", raw.tinyurl_sync_pacing_ms)? {
            config.pacing_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_millis(
            "TINYURL_SYNC_HTTP_TIMEOUT_MS",
            raw.tinyurl_sync_http_timeout_ms,
        )? {
            if ms == 0 {
                return Err(SyncError::configuration(
                    "TINYURL_SYNC_HTTP_TIMEOUT_MS must be greater than zero",
                ));
            }
            config.http_timeout = Duration::from_millis(ms);
        }

        debug!(config = ?config, "Loaded job configuration");
        Ok(config)
    }

    /// Return both mandatory secrets, or the name of the first one missing.
    /// The store key is checked before the shortener token.
    pub fn credentials(&self) -> SyncResult<Credentials> {
        let airtable_api_key = self
            .airtable
            .api_key
            .clone()
            .ok_or(SyncError::MissingCredential(env::AIRTABLE_API_KEY))?;
        let tinyurl_api_token = self
            .tinyurl
            .api_token
            .clone()
            .ok_or(SyncError::MissingCredential(env::TINYURL_API_TOKEN))?;

        Ok(Credentials {
            airtable_api_key,
            tinyurl_api_token,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn override_with(target: &mut String, value: Option<String>) {
    if let Some(v) = non_empty(value) {
        *target = v;
    }
}

fn parse_millis(name: &str, value: Option<String>) -> SyncResult<Option<u64>> {
    non_empty(value)
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map_err(|e| SyncError::configuration(format!("Invalid {name}: {e}")))
        })
        .transpose()
}

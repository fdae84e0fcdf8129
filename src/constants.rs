//! # Constants
//!
//! Status strings written back to records, configuration defaults and the
//! environment variable names the job reads.

/// Status strings written to a record's status field
pub mod status {
    pub const TINYURL_VALID: &str = "tinyurl valid";
    pub const CREATION_FAILED: &str = "error - tinyurl creation failed";
    pub const ERROR_PREFIX: &str = "error - ";
}

/// Default values applied when a variable is unset
pub mod defaults {
    pub const AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
    pub const AIRTABLE_BASE_ID: &str = "appYaT73RTzmoKIrq";
    pub const AIRTABLE_TABLE_NAME: &str = "Applications";
    pub const AIRTABLE_VIEW_NAME: &str = "Grid view";

    pub const NAME_FIELD: &str = "Name [Primary]";
    pub const KEY_FIELD: &str = "rec-id";
    pub const URL_FIELD: &str = "url-to-send";
    pub const STATUS_FIELD: &str = "script";

    pub const TINYURL_API_URL: &str = "https://api.tinyurl.com";
    pub const TINYURL_DOMAIN: &str = "tinyurl.com";
    pub const ALIAS_PREFIX: &str = "kb-";

    pub const PACING_MS: u64 = 3000;
    pub const HTTP_TIMEOUT_MS: u64 = 30000;

    /// Display name used when a record has no name field
    pub const UNKNOWN_NAME: &str = "Unknown";
}

/// Environment variable names
pub mod env {
    pub const AIRTABLE_API_KEY: &str = "AIRTABLE_API_KEY";
    pub const TINYURL_API_TOKEN: &str = "TINYURL_API_TOKEN";
    pub const ENVIRONMENT: &str = "TINYURL_SYNC_ENV";
    pub const LOG_FORMAT: &str = "TINYURL_SYNC_LOG_FORMAT";
}

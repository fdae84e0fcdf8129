//! # Airtable Client
//!
//! Reads the candidate records of a view and writes the status field back,
//! both bearer-authenticated against the table endpoint.

use async_trait::async_trait;
use reqwest::{Client, Request, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, warn};

use super::{endpoint_url, RecordSource, StatusWriter};
use crate::config::AirtableConfig;
use crate::error::SyncResult;
use crate::models::{Record, RecordId};

/// Body of the list-records endpoint
#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<Record>,
    /// Cursor for the next page; present when the view holds more records
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Clone)]
pub struct AirtableClient {
    client: Client,
    config: AirtableConfig,
    api_key: String,
    records_url: Url,
}

impl std::fmt::Debug for AirtableClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableClient")
            .field("records_url", &self.records_url.as_str())
            .field("view_name", &self.config.view_name)
            .finish()
    }
}

impl AirtableClient {
    pub fn new(
        client: Client,
        config: &AirtableConfig,
        api_key: impl Into<String>,
    ) -> SyncResult<Self> {
        let records_url = endpoint_url(
            &config.api_url,
            &[config.base_id.as_str(), config.table_name.as_str()],
        )?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key: api_key.into(),
            records_url,
        })
    }

    /// GET request for the records of the configured view, projected to the
    /// name, key and URL fields
    pub fn fetch_request(&self) -> SyncResult<Request> {
        let mut builder = self
            .client
            .get(self.records_url.clone())
            .bearer_auth(&self.api_key)
            .query(&[("view", self.config.view_name.as_str())]);
        for field in self.config.fields.projection() {
            builder = builder.query(&[("fields[]", field)]);
        }
        Ok(builder.build()?)
    }

    /// PATCH request setting the status field of one record
    pub fn status_request(&self, record_id: &RecordId, message: &str) -> SyncResult<Request> {
        let mut url = self.records_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(record_id.as_str());
        }

        let mut fields = Map::new();
        fields.insert(
            self.config.fields.status.clone(),
            Value::String(message.to_string()),
        );

        Ok(self
            .client
            .patch(url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields }))
            .build()?)
    }
}

#[async_trait]
impl RecordSource for AirtableClient {
    async fn fetch_candidates(&self) -> SyncResult<Vec<Record>> {
        let request = self.fetch_request()?;
        debug!(url = %request.url(), "Fetching records from Airtable");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %body, "Failed to fetch Airtable records");
            return Ok(Vec::new());
        }

        let page: RecordPage = response.json().await?;
        if page.offset.is_some() {
            warn!(
                fetched = page.records.len(),
                "Airtable reported more pages; only the first page is processed"
            );
        }

        info!(
            count = page.records.len(),
            view = %self.config.view_name,
            "Fetched records from Airtable"
        );
        Ok(page.records)
    }
}

#[async_trait]
impl StatusWriter for AirtableClient {
    async fn write_status(&self, record_id: &RecordId, message: &str) -> SyncResult<bool> {
        let request = self.status_request(record_id, message)?;
        let response = self.client.execute(request).await?;
        let status = response.status();

        if status.is_success() {
            debug!(record_id = %record_id, message = %message, "Updated status field");
            Ok(true)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(
                record_id = %record_id,
                status = %status,
                error = %body,
                "Failed to update status field"
            );
            Ok(false)
        }
    }
}

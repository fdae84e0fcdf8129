//! # TinyURL Client
//!
//! Creates permanent aliases under a fixed domain. The API token travels as a
//! query parameter.

use async_trait::async_trait;
use reqwest::{Client, Request, Url};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{endpoint_url, AliasCreator};
use crate::config::TinyUrlConfig;
use crate::error::SyncResult;
use crate::models::AliasRequest;

#[derive(Debug, Serialize)]
struct CreateAliasBody<'a> {
    url: &'a str,
    domain: &'a str,
    alias: String,
}

#[derive(Clone)]
pub struct TinyUrlClient {
    client: Client,
    config: TinyUrlConfig,
    create_url: Url,
}

impl std::fmt::Debug for TinyUrlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TinyUrlClient")
            .field("api_url", &self.config.api_url)
            .field("domain", &self.config.domain)
            .field("alias_prefix", &self.config.alias_prefix)
            .finish()
    }
}

impl TinyUrlClient {
    pub fn new(client: Client, config: &TinyUrlConfig, api_token: &str) -> SyncResult<Self> {
        let mut create_url = endpoint_url(&config.api_url, &["create"])?;
        create_url
            .query_pairs_mut()
            .append_pair("api_token", api_token);

        Ok(Self {
            client,
            config: config.clone(),
            create_url,
        })
    }

    /// POST request registering `prefix + slug` for the target URL
    pub fn create_request(&self, request: &AliasRequest) -> SyncResult<Request> {
        let body = CreateAliasBody {
            url: &request.target_url,
            domain: &self.config.domain,
            alias: request.alias(&self.config.alias_prefix),
        };

        Ok(self
            .client
            .post(self.create_url.clone())
            .json(&body)
            .build()?)
    }
}

#[async_trait]
impl AliasCreator for TinyUrlClient {
    async fn create_alias(&self, request: &AliasRequest) -> SyncResult<bool> {
        let alias = request.alias(&self.config.alias_prefix);
        debug!(alias = %alias, target_url = %request.target_url, "Creating TinyURL alias");

        let response = self.client.execute(self.create_request(request)?).await?;
        let status = response.status();

        if status.is_success() {
            info!(alias = %alias, domain = %self.config.domain, "Created TinyURL alias");
            Ok(true)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(alias = %alias, status = %status, error = %body, "TinyURL rejected alias");
            Ok(false)
        }
    }
}

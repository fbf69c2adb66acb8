//! Grist REST client
//!
//! Reads rows of one table of one Grist document with bearer authentication.

use super::models::{GristRecord, RecordsResponse};
use crate::config::GristConfig;
use crate::domain::{PrefillError, Result, StoreError};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use std::time::Duration;

/// Grist client bound to one document table
pub struct GristClient {
    client: Client,
    records_url: String,
    config: GristConfig,
}

impl GristClient {
    /// Create a new Grist client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: GristConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PrefillError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let records_url = format!(
            "{}/api/docs/{}/tables/{}/records",
            config.server.trim_end_matches('/'),
            config.doc_id,
            config.table_id
        );

        Ok(Self {
            client,
            records_url,
            config,
        })
    }

    pub fn records_url(&self) -> &str {
        &self.records_url
    }

    /// Fetches records matching a Grist filter
    ///
    /// `filter` maps a column to the list of accepted values. An empty map
    /// fetches the whole table.
    pub async fn fetch_records(&self, filter: &Map<String, Value>) -> Result<Vec<GristRecord>> {
        let mut request = self.client.get(&self.records_url);
        if !filter.is_empty() {
            let filter_json = Value::Object(filter.clone()).to_string();
            request = request.query(&[("filter", filter_json)]);
        }
        self.send(request).await
    }

    /// Fetches a single row to check server, credentials, document and table
    pub async fn test_connection(&self) -> Result<()> {
        let request = self.client.get(&self.records_url).query(&[("limit", "1")]);
        self.send(request).await?;

        tracing::info!(
            doc_id = %self.config.doc_id,
            table_id = %self.config.table_id,
            "Grist connection test successful"
        );
        Ok(())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<GristRecord>> {
        let response = request
            .bearer_auth(self.config.api_key.expose_secret().as_ref())
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    StoreError::AuthenticationFailed(format!("Grist answered {status}: {body}"))
                }
                _ => StoreError::QueryFailed(format!("Grist answered {status}: {body}")),
            }
            .into());
        }

        let parsed: RecordsResponse = response.json().await.map_err(|e| {
            StoreError::InvalidResponse(format!("Failed to parse Grist records: {e}"))
        })?;
        Ok(parsed.records)
    }
}

fn map_send_error(e: reqwest::Error) -> PrefillError {
    if e.is_timeout() {
        StoreError::Timeout(e.to_string()).into()
    } else {
        StoreError::ConnectionFailed(e.to_string()).into()
    }
}

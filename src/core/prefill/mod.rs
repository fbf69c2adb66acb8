//! Prefill-link building
//!
//! A canonical record is turned into the provider's flat field table
//! ([`fields`]), posted to the case-creation endpoint of the procedure, and
//! the returned case URL is handed back to the caller. The request is sent
//! once; failures are reported, never retried.

pub mod fields;
pub mod link;

pub use fields::prefill_fields;
pub use link::short_link;

use crate::config::ProviderConfig;
use crate::domain::{CanonicalRecord, PrefillError, ProviderError, Result};
use chrono::NaiveDate;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Case URL returned by the provider, with its optional cosmetic variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefillLink {
    pub url: String,
    pub short_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CaseCreated {
    #[serde(default)]
    dossier_url: Option<String>,
}

/// Creates pre-filled cases on the provider
pub struct PrefillLinkBuilder {
    client: Client,
    config: ProviderConfig,
}

impl PrefillLinkBuilder {
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PrefillError::Configuration(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Creates a pre-filled case and returns its URL
    ///
    /// # Errors
    ///
    /// - [`PrefillError::Configuration`] when no API token is configured,
    ///   before any request is made
    /// - [`ProviderError::Rejected`] for any answer other than 201, carrying
    ///   the raw body
    /// - [`ProviderError::Transport`] when the request gets no answer
    /// - [`ProviderError::InvalidResponse`] for a 201 without `dossier_url`
    pub async fn build_prefill_url(&self, record: &CanonicalRecord) -> Result<String> {
        let token = match self.config.api_token.as_ref() {
            Some(token) if !token.expose_secret().is_empty() => token,
            _ => {
                return Err(PrefillError::Configuration(
                    "Case provider API token is not configured (provider.api_token)".to_string(),
                ))
            }
        };

        let body = prefill_fields(record);
        let url = self.config.case_creation_url();
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose_secret().as_ref())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        crate::log_provider_call!(self.config.procedure_id, status.as_u16(), started.elapsed());

        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let created: CaseCreated = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        match created.dossier_url {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ProviderError::InvalidResponse(
                "Response does not contain a dossier_url".to_string(),
            )
            .into()),
        }
    }

    /// Creates the case and optionally derives the short link
    pub async fn build_link(
        &self,
        record: &CanonicalRecord,
        with_short_link: bool,
        today: NaiveDate,
    ) -> Result<PrefillLink> {
        let url = self.build_prefill_url(record).await?;
        let short_url = with_short_link.then(|| short_link(&url, record, today));
        Ok(PrefillLink { url, short_url })
    }

    /// True when a non-empty API token is configured
    pub fn has_token(&self) -> bool {
        self.config
            .api_token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().is_empty())
    }
}

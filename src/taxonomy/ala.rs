//! HTTP client for the ALA name-matching API.

use std::time::Duration;

use reqwest::Client;

use crate::error::{Result, ValidatorError};

use super::client::{AutocompleteCandidate, BulkMatch, NameMatchClient, NameQuery, SearchResult};

/// Default service endpoint.
const DEFAULT_BASE_URL: &str = "https://api.ala.org.au/namematching";

/// Socket-level timeout on individual requests. The resolver applies its
/// own per-call and overall deadlines on top of this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Name-matching client backed by the ALA namematching service.
pub struct AlaNameMatchClient {
    client: Client,
    base_url: String,
}

impl AlaNameMatchClient {
    /// Create a client against the production endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (test servers, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ValidatorError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn checked(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ValidatorError::Api { status, message });
        }
        Ok(response)
    }
}

impl NameMatchClient for AlaNameMatchClient {
    async fn bulk_match(&self, names: &[String]) -> Result<Vec<BulkMatch>> {
        let payload: Vec<NameQuery> = names
            .iter()
            .map(|name| NameQuery {
                scientific_name: name.clone(),
            })
            .collect();

        let response = self
            .client
            .post(format!("{}/api/searchAllByClassification", self.base_url))
            .json(&payload)
            .send()
            .await?;

        Ok(Self::checked(response).await?.json().await?)
    }

    async fn autocomplete(
        &self,
        query: &str,
        max_results: usize,
        include_synonyms: bool,
    ) -> Result<Vec<AutocompleteCandidate>> {
        let response = self
            .client
            .get(format!("{}/api/autocomplete", self.base_url))
            .query(&[
                ("q", query),
                ("max", &max_results.to_string()),
                ("includeSynonyms", &include_synonyms.to_string()),
            ])
            .send()
            .await?;

        Ok(Self::checked(response).await?.json().await?)
    }

    async fn search(&self, query: &str) -> Result<SearchResult> {
        let response = self
            .client
            .get(format!("{}/api/search", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        Ok(Self::checked(response).await?.json().await?)
    }
}

//! Scripted name-matching client for tests.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;

use super::client::{AutocompleteCandidate, BulkMatch, NameMatchClient, SearchResult};

/// In-memory client returning pre-scripted responses. Names with no
/// script behave as misses at every tier, so Unresolved outcomes need no
/// setup. An optional per-call delay makes deadline behaviour testable
/// under paused time.
#[derive(Debug, Clone, Default)]
pub struct MockNameMatchClient {
    bulk: HashMap<String, BulkMatch>,
    autocomplete: HashMap<String, Vec<AutocompleteCandidate>>,
    search: HashMap<String, SearchResult>,
    delay: Option<Duration>,
}

impl MockNameMatchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an exact bulk-lookup hit for `name`.
    pub fn with_bulk_match(mut self, name: &str, rank: &str) -> Self {
        self.bulk.insert(
            name.to_string(),
            BulkMatch {
                scientific_name: Some(name.to_string()),
                rank: Some(rank.to_string()),
                fields: Default::default(),
            },
        );
        self
    }

    /// Script the autocomplete candidate list for `query`.
    pub fn with_autocomplete(mut self, query: &str, candidates: Vec<AutocompleteCandidate>) -> Self {
        self.autocomplete.insert(query.to_string(), candidates);
        self
    }

    /// Script the exact-search result for `query`.
    pub fn with_search(mut self, query: &str, result: SearchResult) -> Self {
        self.search.insert(query.to_string(), result);
        self
    }

    /// Sleep this long inside every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl NameMatchClient for MockNameMatchClient {
    async fn bulk_match(&self, names: &[String]) -> Result<Vec<BulkMatch>> {
        self.pause().await;
        Ok(names
            .iter()
            .filter_map(|name| self.bulk.get(name).cloned())
            .collect())
    }

    async fn autocomplete(
        &self,
        query: &str,
        max_results: usize,
        _include_synonyms: bool,
    ) -> Result<Vec<AutocompleteCandidate>> {
        self.pause().await;
        let mut candidates = self.autocomplete.get(query).cloned().unwrap_or_default();
        candidates.truncate(max_results);
        Ok(candidates)
    }

    async fn search(&self, query: &str) -> Result<SearchResult> {
        self.pause().await;
        Ok(self.search.get(query).cloned().unwrap_or_default())
    }
}

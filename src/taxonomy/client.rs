//! Name-matching service contract and wire types.

use std::future::Future;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;

/// One name in a bulk lookup request.
#[derive(Debug, Clone, Serialize)]
pub struct NameQuery {
    #[serde(rename = "scientificName")]
    pub scientific_name: String,
}

/// Per-name result of the bulk lookup, matched against the requested
/// name by exact string equality.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkMatch {
    #[serde(rename = "scientificName", default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    /// Any classification terms echoed alongside the match.
    #[serde(flatten)]
    pub fields: IndexMap<String, JsonValue>,
}

/// A ranked autocomplete candidate, possibly carrying synonym candidates
/// of the same shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteCandidate {
    pub name: String,
    #[serde(default)]
    pub rank: Option<String>,
    /// Classification term mapping (the service spells class "classs").
    #[serde(default)]
    pub cl: IndexMap<String, String>,
    #[serde(rename = "synonymMatch", default)]
    pub synonym_match: Vec<AutocompleteCandidate>,
}

/// Result of the single-name exact search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "scientificName", default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    /// Classification terms echoed at the top level of the response.
    #[serde(flatten)]
    pub fields: IndexMap<String, JsonValue>,
}

/// Client for the external taxonomic name-matching service.
///
/// Implementations must be thread-safe (Send + Sync); the resolver
/// dispatches per-name fallback chains through a worker pool.
pub trait NameMatchClient: Send + Sync {
    /// One bulk request carrying all distinct names of a dataset.
    fn bulk_match(&self, names: &[String]) -> impl Future<Output = Result<Vec<BulkMatch>>> + Send;

    /// Ranked candidate lookup with a bounded candidate count and a
    /// synonym-inclusion toggle.
    fn autocomplete(
        &self,
        query: &str,
        max_results: usize,
        include_synonyms: bool,
    ) -> impl Future<Output = Result<Vec<AutocompleteCandidate>>> + Send;

    /// Single-name exact search, the last tier of the fallback chain.
    fn search(&self, query: &str) -> impl Future<Output = Result<SearchResult>> + Send;
}

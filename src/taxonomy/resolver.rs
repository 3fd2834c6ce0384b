//! Taxonomic name resolution against a name-matching backbone.
//!
//! One bulk lookup covers every distinct name; names the bulk lookup
//! misses each run a fallback chain (autocomplete, synonym scan, exact
//! search) through a bounded worker pool. Every network call is capped by
//! a per-call timeout and an overall deadline; names still pending when
//! the deadline elapses are reported unresolved, never dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::{Result, ValidatorError};
use crate::input::RecordSet;
use crate::report::{TaxonResolution, TaxonStatus, TaxonomyReport};
use crate::validators::populated_counts_for;
use crate::vocab::{REQUIRED_TAXONOMY_COLUMNS, TAXON_CLASSIFICATION_TERMS};

use super::client::{AutocompleteCandidate, BulkMatch, NameMatchClient, SearchResult};

const SCIENTIFIC_NAME: &str = "scientificName";

/// Tuning for the resolution pipeline.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Candidate count requested from the autocomplete tier.
    pub num_matches: usize,
    /// Ask the autocomplete tier to include synonym candidates.
    pub include_synonyms: bool,
    /// Fallback chains running at once.
    pub max_concurrency: usize,
    /// Cap on any single network call.
    pub call_timeout: Duration,
    /// Overall budget for resolving one dataset's names.
    pub deadline: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            num_matches: 5,
            include_synonyms: true,
            max_concurrency: 8,
            call_timeout: Duration::from_secs(10),
            deadline: Duration::from_secs(60),
        }
    }
}

/// Resolves the distinct scientific names of a record set.
pub struct TaxonomyResolver<C> {
    client: Arc<C>,
    config: ResolverConfig,
}

impl<C: NameMatchClient + 'static> TaxonomyResolver<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, ResolverConfig::default())
    }

    pub fn with_config(client: C, config: ResolverConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
        }
    }

    /// Resolve the `scientificName` column of a record set.
    ///
    /// Returns `None` when the column is absent. Resolution failures never
    /// abort the run; they surface as unresolved entries in the report.
    pub async fn create_report(&self, record_set: &RecordSet) -> Option<TaxonomyReport> {
        if !record_set.has_column(SCIENTIFIC_NAME) {
            return None;
        }

        let names = record_set.distinct_text_values(SCIENTIFIC_NAME);
        let resolutions = self.resolve_names(&names).await;
        let has_invalid_taxa = resolutions
            .iter()
            .any(|r| r.status != TaxonStatus::MatchedExact);

        Some(TaxonomyReport {
            has_invalid_taxa,
            valid_taxon_count: trusted_taxon_count(record_set, has_invalid_taxa),
            resolutions,
        })
    }

    /// Resolve a list of distinct names, preserving input order.
    pub async fn resolve_names(&self, names: &[String]) -> Vec<TaxonResolution> {
        if names.is_empty() {
            return Vec::new();
        }
        let deadline = Instant::now() + self.config.deadline;

        let bulk = match bounded(
            self.config.call_timeout,
            deadline,
            self.client.bulk_match(names),
        )
        .await
        {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "bulk name lookup failed, falling back per name");
                Vec::new()
            }
        };
        let matched: HashMap<&str, &BulkMatch> = bulk
            .iter()
            .filter_map(|m| m.scientific_name.as_deref().map(|n| (n, m)))
            .collect();

        // Seed every name as unresolved so task panics and deadline
        // overruns still leave an entry, then overwrite in place.
        let mut resolutions: IndexMap<String, TaxonResolution> = names
            .iter()
            .map(|name| (name.clone(), unresolved(name)))
            .collect();

        let mut pending = Vec::new();
        for name in names {
            match matched.get(name.as_str()) {
                Some(m) => {
                    resolutions.insert(name.clone(), resolution_from_bulk(name, m));
                }
                None => pending.push(name.clone()),
            }
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut tasks = JoinSet::new();
        for name in pending {
            let client = Arc::clone(&self.client);
            let config = self.config.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                match resolve_fallback(client.as_ref(), &config, &name, deadline).await {
                    Ok(resolution) => resolution,
                    Err(e) => {
                        debug!(name = %name, error = %e, "name left unresolved");
                        unresolved(&name)
                    }
                }
            });
        }
        while let Some(joined) = tasks.join_next().await {
            if let Ok(resolution) = joined {
                resolutions.insert(resolution.original_name.clone(), resolution);
            }
        }

        resolutions.into_values().collect()
    }
}

/// Records whose taxonomic information can be trusted.
///
/// All-or-nothing: any invalid name distrusts the whole dataset.
/// Otherwise the count is the smallest populated count over the present
/// required taxonomy columns, vernacular names excepted since they carry
/// no resolution weight.
pub fn trusted_taxon_count(record_set: &RecordSet, has_invalid_taxa: bool) -> usize {
    if has_invalid_taxa {
        return 0;
    }
    let total = record_set.row_count();
    populated_counts_for(record_set, REQUIRED_TAXONOMY_COLUMNS)
        .iter()
        .filter(|(field, _)| field.as_str() != "vernacularName")
        .map(|(_, &count)| count)
        .min()
        .unwrap_or(total)
        .min(total)
}

/// Run `fut` against the sooner of the per-call cap and the overall
/// deadline.
async fn bounded<T>(
    call_timeout: Duration,
    deadline: Instant,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    let at = deadline.min(Instant::now() + call_timeout);
    match tokio::time::timeout_at(at, fut).await {
        Ok(result) => result,
        Err(_) => Err(ValidatorError::DeadlineExceeded),
    }
}

/// The per-name fallback chain for names the bulk lookup missed.
async fn resolve_fallback<C: NameMatchClient>(
    client: &C,
    config: &ResolverConfig,
    name: &str,
    deadline: Instant,
) -> Result<TaxonResolution> {
    let candidates = match bounded(
        config.call_timeout,
        deadline,
        client.autocomplete(name, config.num_matches, config.include_synonyms),
    )
    .await
    {
        Ok(candidates) => candidates,
        Err(e @ ValidatorError::DeadlineExceeded) => return Err(e),
        Err(e) => {
            warn!(name = %name, error = %e, "autocomplete tier failed");
            Vec::new()
        }
    };

    if let Some(top) = candidates.first() {
        if top.rank.is_some() {
            return Ok(resolution_from_candidate(
                name,
                TaxonStatus::MatchedViaAutocomplete,
                top,
            ));
        }
        for synonym in &top.synonym_match {
            if synonym.rank.is_some() {
                return Ok(resolution_from_candidate(
                    name,
                    TaxonStatus::MatchedViaSynonym,
                    synonym,
                ));
            }
        }
        // A rankless candidate with no ranked synonym is a dead end.
        return Err(ValidatorError::ResolutionExhausted {
            name: name.to_string(),
        });
    }

    let result = match bounded(config.call_timeout, deadline, client.search(name)).await {
        Ok(result) => result,
        Err(e @ ValidatorError::DeadlineExceeded) => return Err(e),
        Err(e) => {
            warn!(name = %name, error = %e, "search tier failed");
            SearchResult::default()
        }
    };
    if result.success {
        Ok(resolution_from_search(name, &result))
    } else {
        Err(ValidatorError::ResolutionExhausted {
            name: name.to_string(),
        })
    }
}

fn unresolved(name: &str) -> TaxonResolution {
    TaxonResolution {
        original_name: name.to_string(),
        status: TaxonStatus::Unresolved,
        proposed_name: None,
        proposed_rank: None,
        classification: TAXON_CLASSIFICATION_TERMS
            .iter()
            .map(|term| (term.to_string(), None))
            .collect(),
    }
}

fn resolution_from_bulk(name: &str, m: &BulkMatch) -> TaxonResolution {
    TaxonResolution {
        original_name: name.to_string(),
        status: TaxonStatus::MatchedExact,
        proposed_name: m.scientific_name.clone(),
        proposed_rank: m.rank.clone(),
        classification: TAXON_CLASSIFICATION_TERMS
            .iter()
            .map(|&term| {
                let value = match term {
                    "scientificName" => m.scientific_name.clone(),
                    "rank" => m.rank.clone(),
                    _ => m.fields.get(term).and_then(json_string),
                };
                (term.to_string(), value)
            })
            .collect(),
    }
}

fn resolution_from_candidate(
    name: &str,
    status: TaxonStatus,
    candidate: &AutocompleteCandidate,
) -> TaxonResolution {
    TaxonResolution {
        original_name: name.to_string(),
        status,
        proposed_name: Some(candidate.name.clone()),
        proposed_rank: candidate.rank.clone(),
        classification: TAXON_CLASSIFICATION_TERMS
            .iter()
            .map(|&term| {
                let value = match term {
                    "scientificName" => Some(candidate.name.clone()),
                    "rank" => candidate.rank.clone(),
                    _ => candidate.cl.get(term).cloned(),
                };
                (term.to_string(), value)
            })
            .collect(),
    }
}

fn resolution_from_search(name: &str, result: &SearchResult) -> TaxonResolution {
    TaxonResolution {
        original_name: name.to_string(),
        status: TaxonStatus::MatchedViaSearch,
        proposed_name: result.scientific_name.clone(),
        proposed_rank: result.rank.clone(),
        classification: TAXON_CLASSIFICATION_TERMS
            .iter()
            .map(|&term| {
                let value = match term {
                    "scientificName" => result.scientific_name.clone(),
                    "rank" => result.rank.clone(),
                    _ => result.fields.get(term).and_then(json_string),
                };
                (term.to_string(), value)
            })
            .collect(),
    }
}

fn json_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;
    use crate::taxonomy::mock::MockNameMatchClient;
    use indexmap::indexmap;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn record_set_with_names(values: &[&str]) -> RecordSet {
        RecordSet::from_columns(indexmap! {
            "scientificName".to_string() => values
                .iter()
                .map(|s| Value::from(*s))
                .collect::<Vec<_>>(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_exact_matches_keep_input_order() {
        let client = MockNameMatchClient::new()
            .with_bulk_match("Osphranter rufus", "species")
            .with_bulk_match("Acacia dealbata", "species");
        let resolver = TaxonomyResolver::new(client);

        let resolutions = resolver
            .resolve_names(&names(&["Acacia dealbata", "Osphranter rufus"]))
            .await;

        assert_eq!(resolutions.len(), 2);
        assert_eq!(resolutions[0].original_name, "Acacia dealbata");
        assert_eq!(resolutions[1].original_name, "Osphranter rufus");
        assert!(resolutions
            .iter()
            .all(|r| r.status == TaxonStatus::MatchedExact));
    }

    #[tokio::test]
    async fn test_autocomplete_fallback() {
        let client = MockNameMatchClient::new().with_autocomplete(
            "Foo bar",
            vec![AutocompleteCandidate {
                name: "Foo baz".to_string(),
                rank: Some("species".to_string()),
                cl: indexmap! {
                    "genus".to_string() => "Foo".to_string(),
                },
                synonym_match: vec![],
            }],
        );
        let resolver = TaxonomyResolver::new(client);

        let resolutions = resolver.resolve_names(&names(&["Foo bar"])).await;
        assert_eq!(resolutions[0].status, TaxonStatus::MatchedViaAutocomplete);
        assert_eq!(resolutions[0].proposed_name.as_deref(), Some("Foo baz"));
        assert_eq!(
            resolutions[0].classification["genus"].as_deref(),
            Some("Foo")
        );
        // terms the backbone did not echo stay null
        assert!(resolutions[0].classification["kingdom"].is_none());
    }

    #[tokio::test]
    async fn test_synonym_fallback_when_top_candidate_rankless() {
        let client = MockNameMatchClient::new().with_autocomplete(
            "Racosperma dealbatum",
            vec![AutocompleteCandidate {
                name: "Racosperma dealbatum".to_string(),
                rank: None,
                cl: Default::default(),
                synonym_match: vec![AutocompleteCandidate {
                    name: "Acacia dealbata".to_string(),
                    rank: Some("species".to_string()),
                    cl: Default::default(),
                    synonym_match: vec![],
                }],
            }],
        );
        let resolver = TaxonomyResolver::new(client);

        let resolutions = resolver.resolve_names(&names(&["Racosperma dealbatum"])).await;
        assert_eq!(resolutions[0].status, TaxonStatus::MatchedViaSynonym);
        assert_eq!(
            resolutions[0].proposed_name.as_deref(),
            Some("Acacia dealbata")
        );
    }

    #[tokio::test]
    async fn test_search_fallback_when_autocomplete_empty() {
        let client = MockNameMatchClient::new().with_search(
            "Vombatus ursinus",
            SearchResult {
                success: true,
                scientific_name: Some("Vombatus ursinus".to_string()),
                rank: Some("species".to_string()),
                fields: Default::default(),
            },
        );
        let resolver = TaxonomyResolver::new(client);

        let resolutions = resolver.resolve_names(&names(&["Vombatus ursinus"])).await;
        assert_eq!(resolutions[0].status, TaxonStatus::MatchedViaSearch);
    }

    #[tokio::test]
    async fn test_every_tier_missing_is_unresolved() {
        let resolver = TaxonomyResolver::new(MockNameMatchClient::new());
        let resolutions = resolver.resolve_names(&names(&["Nonsensicus totalus"])).await;
        assert_eq!(resolutions[0].status, TaxonStatus::Unresolved);
        assert!(resolutions[0].proposed_name.is_none());
        assert!(resolutions[0]
            .classification
            .values()
            .all(|v| v.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_overrun_reports_unresolved() {
        let client = MockNameMatchClient::new()
            .with_bulk_match("Acacia dealbata", "species")
            .with_delay(Duration::from_secs(3600));
        let config = ResolverConfig {
            deadline: Duration::from_secs(5),
            call_timeout: Duration::from_secs(60),
            ..ResolverConfig::default()
        };
        let resolver = TaxonomyResolver::with_config(client, config);

        let resolutions = resolver
            .resolve_names(&names(&["Acacia dealbata", "Foo bar"]))
            .await;
        assert_eq!(resolutions.len(), 2);
        assert!(resolutions
            .iter()
            .all(|r| r.status == TaxonStatus::Unresolved));
    }

    #[tokio::test]
    async fn test_report_none_without_scientific_name_column() {
        let rs = RecordSet::from_columns(indexmap! {
            "eventDate".to_string() => vec![Value::from("2020-01-01")],
        })
        .unwrap();
        let resolver = TaxonomyResolver::new(MockNameMatchClient::new());
        assert!(resolver.create_report(&rs).await.is_none());
    }

    #[tokio::test]
    async fn test_report_all_exact_is_valid() {
        let rs = record_set_with_names(&["Acacia dealbata", "Acacia dealbata", "Osphranter rufus"]);
        let client = MockNameMatchClient::new()
            .with_bulk_match("Acacia dealbata", "species")
            .with_bulk_match("Osphranter rufus", "species");
        let resolver = TaxonomyResolver::new(client);

        let report = resolver.create_report(&rs).await.unwrap();
        assert!(!report.has_invalid_taxa);
        // duplicate rows collapse to one resolution per distinct name
        assert_eq!(report.resolutions.len(), 2);
        assert_eq!(report.valid_taxon_count, 3);
    }

    #[tokio::test]
    async fn test_report_fallback_match_still_flags_dataset() {
        let rs = record_set_with_names(&["Foo bar"]);
        let client = MockNameMatchClient::new().with_autocomplete(
            "Foo bar",
            vec![AutocompleteCandidate {
                name: "Foo baz".to_string(),
                rank: Some("species".to_string()),
                cl: Default::default(),
                synonym_match: vec![],
            }],
        );
        let resolver = TaxonomyResolver::new(client);

        let report = resolver.create_report(&rs).await.unwrap();
        assert!(report.has_invalid_taxa);
        assert_eq!(report.valid_taxon_count, 0);
        assert_eq!(
            report.resolutions[0].status,
            TaxonStatus::MatchedViaAutocomplete
        );
    }

    #[test]
    fn test_trusted_count_minimum_over_taxonomy_columns() {
        let rs = RecordSet::from_columns(indexmap! {
            "scientificName".to_string() => vec![
                Value::from("a"), Value::from("b"), Value::from("c"),
            ],
            "kingdom".to_string() => vec![
                Value::from("Plantae"), Value::Null, Value::from("Plantae"),
            ],
            // vernacular names carry no weight in the count
            "vernacularName".to_string() => vec![
                Value::Null, Value::Null, Value::Null,
            ],
        })
        .unwrap();
        assert_eq!(trusted_taxon_count(&rs, false), 2);
        assert_eq!(trusted_taxon_count(&rs, true), 0);
    }
}

//! Taxonomic name resolution: service clients and the resolver pipeline.

mod ala;
mod client;
mod mock;
mod resolver;

pub use ala::AlaNameMatchClient;
pub use client::{AutocompleteCandidate, BulkMatch, NameMatchClient, NameQuery, SearchResult};
pub use mock::MockNameMatchClient;
pub use resolver::{trusted_taxon_count, ResolverConfig, TaxonomyResolver};

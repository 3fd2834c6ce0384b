//! Report value types produced by the validation pipeline.
//!
//! Reports are pure values: constructed once per validation invocation,
//! JSON-serializable, and never updated in place.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which required-column profile a report was produced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    Occurrence,
    Event,
}

/// Column name to populated-value count, in column order.
pub type ColumnProfile = IndexMap<String, usize>;

/// Result of checking latitude/longitude validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatesReport {
    /// Both `decimalLatitude` and `decimalLongitude` columns exist.
    pub has_coordinates_fields: bool,
    /// Populated latitude values that are non-numeric or outside [-90, 90].
    pub invalid_decimal_latitude_count: usize,
    /// Populated longitude values that are non-numeric or outside [-180, 180].
    pub invalid_decimal_longitude_count: usize,
}

/// Result of the structural `eventDate` check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeReport {
    pub has_invalid_datetime: bool,
    pub num_invalid_datetime: usize,
}

/// Result of a controlled-vocabulary membership check on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyReport {
    /// The field that was checked.
    pub field: String,
    /// Whether the field exists in the record set.
    pub has_field: bool,
    /// Populated values whose lower-cased form is in the vocabulary.
    pub recognised_count: usize,
    /// Populated values outside the vocabulary.
    pub unrecognised_count: usize,
    /// Up to 10 distinct non-matching values, original casing preserved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_matching_values: Vec<String>,
}

/// How a scientific name was resolved against the taxonomic backbone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonStatus {
    /// The bulk lookup matched the name exactly.
    MatchedExact,
    /// The autocomplete fallback produced a ranked candidate.
    MatchedViaAutocomplete,
    /// A synonym of an autocomplete candidate carried the accepted name.
    MatchedViaSynonym,
    /// The single-name exact search succeeded.
    MatchedViaSearch,
    /// Every tier failed, or the resolution deadline elapsed.
    Unresolved,
}

/// Resolution outcome for one distinct scientific-name string. All rows
/// sharing the string inherit this resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonResolution {
    /// The name as it appears in the record set.
    pub original_name: String,
    pub status: TaxonStatus,
    /// Name proposed by the backbone, when any tier succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_name: Option<String>,
    /// Rank of the proposed name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_rank: Option<String>,
    /// Classification term to value; terms the backbone did not echo are null.
    pub classification: IndexMap<String, Option<String>>,
}

/// Result of resolving every distinct scientific name in a record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyReport {
    /// True when any distinct name missed the bulk lookup.
    pub has_invalid_taxa: bool,
    /// Per-name resolutions, in first-seen column order.
    pub resolutions: Vec<TaxonResolution>,
    /// Records whose taxonomic information is trusted under the
    /// all-or-nothing policy (zero when any name is invalid).
    pub valid_taxon_count: usize,
}

/// Compliance report for an occurrence or event core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub record_type: RecordType,
    pub record_count: usize,
    /// Rows failing the identifier presence/uniqueness check.
    pub record_error_count: usize,
    pub all_required_columns_present: bool,
    /// Required columns absent from the record set. Always a list, never null.
    pub missing_columns: Vec<String>,
    /// Column names that are not recognized Darwin Core terms.
    pub incorrect_dwc_terms: Vec<String>,
    pub column_counts: ColumnProfile,
    /// Rows with a populated temporal field.
    pub records_with_temporal_count: usize,
    pub datetime_report: DateTimeReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates_report: Option<CoordinatesReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vocab_reports: Vec<VocabularyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy_report: Option<TaxonomyReport>,
}

/// Compliance report for an archive extension (multimedia or measurement).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionReport {
    pub record_count: usize,
    pub all_required_columns_present: bool,
    pub missing_columns: Vec<String>,
    pub incorrect_dwc_terms: Vec<String>,
    pub column_counts: ColumnProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_to_nested_json() {
        let report = ValidationReport {
            record_type: RecordType::Occurrence,
            record_count: 2,
            record_error_count: 0,
            all_required_columns_present: false,
            missing_columns: vec!["kingdom".to_string()],
            incorrect_dwc_terms: vec![],
            column_counts: ColumnProfile::from_iter([("scientificName".to_string(), 2)]),
            records_with_temporal_count: 2,
            datetime_report: DateTimeReport {
                has_invalid_datetime: false,
                num_invalid_datetime: 0,
            },
            coordinates_report: Some(CoordinatesReport {
                has_coordinates_fields: true,
                invalid_decimal_latitude_count: 0,
                invalid_decimal_longitude_count: 0,
            }),
            vocab_reports: vec![],
            taxonomy_report: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["record_type"], "Occurrence");
        assert_eq!(json["missing_columns"][0], "kingdom");
        assert_eq!(
            json["coordinates_report"]["has_coordinates_fields"],
            true
        );
        // absent optional sub-reports are omitted entirely
        assert!(json.get("taxonomy_report").is_none());
    }

    #[test]
    fn test_taxon_status_snake_case() {
        let json = serde_json::to_string(&TaxonStatus::MatchedViaAutocomplete).unwrap();
        assert_eq!(json, "\"matched_via_autocomplete\"");
    }
}

//! High-level validation facade composing the sub-validators into
//! record-type-specific reports.

use tracing::info;

use crate::error::{Result, ValidatorError};
use crate::input::RecordSet;
use crate::report::{
    ExtensionReport, RecordType, ValidationReport,
};
use crate::taxonomy::{NameMatchClient, ResolverConfig, TaxonomyResolver};
use crate::validators::{
    check_id_fields, create_datetime_report, create_vocabulary_report, field_populated_counts,
    generate_coordinates_report, missing_required_columns, non_compliant_terms,
    records_with_any_populated,
};
use crate::vocab::{
    DwcTermRegistry, BASIS_OF_RECORD_VOCABULARY, GEODETIC_DATUM_VOCABULARY,
    REQUIRED_EMOF_COLUMNS, REQUIRED_EVENT_COLUMNS, REQUIRED_MULTIMEDIA_COLUMNS_EVENT,
    REQUIRED_MULTIMEDIA_COLUMNS_OCCURRENCE, REQUIRED_OTHER_OCCURRENCE_COLUMNS,
    REQUIRED_SPATIAL_COLUMNS, REQUIRED_TAXONOMY_COLUMNS, UNIQUE_ID_FIELDS,
};

/// Fields any one of which makes a record temporally annotated.
const TEMPORAL_FIELDS: &[&str] = &["eventDate", "year", "month", "day"];

/// Which archive extension a record set claims to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    OccurrenceMultimedia,
    EventMultimedia,
    ExtendedMeasurementOrFact,
}

impl ExtensionKind {
    fn required_columns(self) -> &'static [&'static str] {
        match self {
            ExtensionKind::OccurrenceMultimedia => REQUIRED_MULTIMEDIA_COLUMNS_OCCURRENCE,
            ExtensionKind::EventMultimedia => REQUIRED_MULTIMEDIA_COLUMNS_EVENT,
            ExtensionKind::ExtendedMeasurementOrFact => REQUIRED_EMOF_COLUMNS,
        }
    }
}

/// Configuration for the validation facade.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Candidate unique-identifier fields for occurrence records.
    pub id_fields: Vec<String>,
    /// Identifier field an upstream archive reader renamed to `id`.
    pub id_term: Option<String>,
    /// Tuning for the taxonomic resolver.
    pub resolver: ResolverConfig,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            id_fields: UNIQUE_ID_FIELDS.iter().map(|f| f.to_string()).collect(),
            id_term: None,
            resolver: ResolverConfig::default(),
        }
    }
}

/// Darwin Core dataset validator.
///
/// Generic over the name-matching client so tests can script resolutions
/// while production code talks to the real backbone.
pub struct DwcValidator<C> {
    resolver: TaxonomyResolver<C>,
    registry: DwcTermRegistry,
    config: ValidatorConfig,
}

impl<C: NameMatchClient + 'static> DwcValidator<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, ValidatorConfig::default())
    }

    pub fn with_config(client: C, config: ValidatorConfig) -> Self {
        Self {
            resolver: TaxonomyResolver::with_config(client, config.resolver.clone()),
            registry: DwcTermRegistry::default(),
            config,
        }
    }

    /// Replace the Darwin Core term registry (tests, alternate profiles).
    pub fn with_term_registry(mut self, registry: DwcTermRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Validate a record set against the occurrence profile.
    pub async fn validate_occurrence(&self, record_set: &RecordSet) -> Result<ValidationReport> {
        Self::check_not_empty(record_set)?;
        info!(
            rows = record_set.row_count(),
            columns = record_set.column_count(),
            "validating occurrence core"
        );

        let mut missing_columns = {
            let mut taxonomy = missing_required_columns(record_set, REQUIRED_TAXONOMY_COLUMNS);
            // vernacularName is optional despite living in the taxonomy list
            taxonomy.retain(|c| c != "vernacularName");
            taxonomy
        };
        missing_columns.extend(missing_required_columns(record_set, REQUIRED_SPATIAL_COLUMNS));

        // The no-overlap skip can swallow an absent coordinate pair; hint
        // at it without asserting it is required.
        if !missing_columns.iter().any(|c| c == "decimalLatitude")
            && !record_set.has_column("decimalLatitude")
        {
            missing_columns.push("MAYBE: decimalLatitude".to_string());
            missing_columns.push("MAYBE: decimalLongitude".to_string());
        }
        missing_columns.extend(missing_required_columns(
            record_set,
            REQUIRED_OTHER_OCCURRENCE_COLUMNS,
        ));

        let id_fields: Vec<&str> = self.config.id_fields.iter().map(String::as_str).collect();
        let record_error_count =
            check_id_fields(record_set, &id_fields, self.config.id_term.as_deref());

        if !UNIQUE_ID_FIELDS.iter().any(|f| record_set.has_column(f)) {
            missing_columns.push("occurrenceID OR catalogNumber OR recordNumber".to_string());
        }
        let all_required_columns_present = missing_columns.is_empty();

        let mut vocab_reports = vec![create_vocabulary_report(
            record_set,
            "basisOfRecord",
            BASIS_OF_RECORD_VOCABULARY,
        )];
        if record_set.has_column("geodeticDatum") {
            vocab_reports.push(create_vocabulary_report(
                record_set,
                "geodeticDatum",
                GEODETIC_DATUM_VOCABULARY.as_slice(),
            ));
        }

        let taxonomy_report = self.resolver.create_report(record_set).await;

        Ok(ValidationReport {
            record_type: RecordType::Occurrence,
            record_count: record_set.row_count(),
            record_error_count,
            all_required_columns_present,
            missing_columns,
            incorrect_dwc_terms: non_compliant_terms(record_set, &self.registry),
            column_counts: field_populated_counts(record_set),
            records_with_temporal_count: temporal_count(record_set),
            datetime_report: create_datetime_report(record_set),
            coordinates_report: Some(generate_coordinates_report(record_set)),
            vocab_reports,
            taxonomy_report,
        })
    }

    /// Validate a record set against the event profile.
    ///
    /// Events carry no taxonomy resolution and no basis-of-record check;
    /// the identifier candidate is always `eventID`.
    pub async fn validate_event(&self, record_set: &RecordSet) -> Result<ValidationReport> {
        Self::check_not_empty(record_set)?;
        info!(
            rows = record_set.row_count(),
            columns = record_set.column_count(),
            "validating event core"
        );

        let record_error_count =
            check_id_fields(record_set, &["eventID"], self.config.id_term.as_deref());
        let missing_columns = missing_required_columns(record_set, REQUIRED_EVENT_COLUMNS);
        let all_required_columns_present = missing_columns.is_empty();

        let mut vocab_reports = Vec::new();
        if record_set.has_column("geodeticDatum") {
            vocab_reports.push(create_vocabulary_report(
                record_set,
                "geodeticDatum",
                GEODETIC_DATUM_VOCABULARY.as_slice(),
            ));
        }

        Ok(ValidationReport {
            record_type: RecordType::Event,
            record_count: record_set.row_count(),
            record_error_count,
            all_required_columns_present,
            missing_columns,
            incorrect_dwc_terms: non_compliant_terms(record_set, &self.registry),
            column_counts: field_populated_counts(record_set),
            records_with_temporal_count: temporal_count(record_set),
            datetime_report: create_datetime_report(record_set),
            coordinates_report: Some(generate_coordinates_report(record_set)),
            vocab_reports,
            taxonomy_report: None,
        })
    }

    /// Validate an archive extension. Pure: no external calls.
    pub fn validate_extension(
        &self,
        record_set: &RecordSet,
        kind: ExtensionKind,
    ) -> Result<ExtensionReport> {
        Self::check_not_empty(record_set)?;
        let missing_columns = missing_required_columns(record_set, kind.required_columns());

        Ok(ExtensionReport {
            record_count: record_set.row_count(),
            all_required_columns_present: missing_columns.is_empty(),
            missing_columns,
            incorrect_dwc_terms: non_compliant_terms(record_set, &self.registry),
            column_counts: field_populated_counts(record_set),
        })
    }

    fn check_not_empty(record_set: &RecordSet) -> Result<()> {
        if record_set.column_count() == 0 {
            return Err(ValidatorError::EmptyData(
                "record set has no columns".to_string(),
            ));
        }
        Ok(())
    }
}

/// Rows carrying at least one populated temporal field.
fn temporal_count(record_set: &RecordSet) -> usize {
    records_with_any_populated(record_set, TEMPORAL_FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;
    use crate::report::TaxonStatus;
    use crate::taxonomy::MockNameMatchClient;
    use indexmap::{indexmap, IndexMap};

    fn column(values: &[&str]) -> Vec<Value> {
        values.iter().map(|s| Value::from(*s)).collect()
    }

    fn full_occurrence() -> RecordSet {
        let mut columns: IndexMap<String, Vec<Value>> = IndexMap::new();
        for field in [
            "scientificName",
            "genus",
            "family",
            "order",
            "class",
            "phylum",
            "kingdom",
            "decimalLatitude",
            "decimalLongitude",
            "geodeticDatum",
            "coordinateUncertaintyInMeters",
            "basisOfRecord",
            "eventDate",
            "occurrenceID",
        ] {
            columns.insert(field.to_string(), column(&["x", "y"]));
        }
        columns.insert(
            "scientificName".to_string(),
            column(&["Acacia dealbata", "Acacia dealbata"]),
        );
        columns.insert("occurrenceID".to_string(), column(&["1", "2"]));
        columns.insert(
            "eventDate".to_string(),
            column(&["2020-01-01", "2020-01-02"]),
        );
        columns.insert("decimalLatitude".to_string(), column(&["-33.8", "-34.1"]));
        columns.insert("decimalLongitude".to_string(), column(&["151.2", "150.9"]));
        columns.insert("geodeticDatum".to_string(), column(&["WGS84", "WGS84"]));
        columns.insert(
            "basisOfRecord".to_string(),
            column(&["HumanObservation", "HumanObservation"]),
        );
        RecordSet::from_columns(columns).unwrap()
    }

    fn validator() -> DwcValidator<MockNameMatchClient> {
        DwcValidator::new(MockNameMatchClient::new().with_bulk_match("Acacia dealbata", "species"))
    }

    #[tokio::test]
    async fn test_clean_occurrence_report() {
        let report = validator()
            .validate_occurrence(&full_occurrence())
            .await
            .unwrap();

        assert_eq!(report.record_type, RecordType::Occurrence);
        assert_eq!(report.record_count, 2);
        assert_eq!(report.record_error_count, 0);
        assert!(report.all_required_columns_present);
        assert!(report.missing_columns.is_empty());
        assert_eq!(report.records_with_temporal_count, 2);
        assert!(!report.datetime_report.has_invalid_datetime);

        let coordinates = report.coordinates_report.unwrap();
        assert!(coordinates.has_coordinates_fields);
        assert_eq!(coordinates.invalid_decimal_latitude_count, 0);

        // basisOfRecord always checked, geodeticDatum only when present
        assert_eq!(report.vocab_reports.len(), 2);
        assert_eq!(report.vocab_reports[0].field, "basisOfRecord");
        assert_eq!(report.vocab_reports[0].recognised_count, 2);
        assert_eq!(report.vocab_reports[1].field, "geodeticDatum");

        let taxonomy = report.taxonomy_report.unwrap();
        assert!(!taxonomy.has_invalid_taxa);
        assert_eq!(taxonomy.resolutions[0].status, TaxonStatus::MatchedExact);
        assert_eq!(taxonomy.valid_taxon_count, 2);
    }

    #[tokio::test]
    async fn test_missing_identifier_adds_combined_hint() {
        let rs = RecordSet::from_columns(indexmap! {
            "scientificName".to_string() => column(&["Acacia dealbata"]),
            "eventDate".to_string() => column(&["2020-01-01"]),
        })
        .unwrap();
        let report = validator().validate_occurrence(&rs).await.unwrap();

        assert!(!report.all_required_columns_present);
        // every row errors: no identifier candidate exists
        assert_eq!(report.record_error_count, 1);
        assert!(report
            .missing_columns
            .contains(&"occurrenceID OR catalogNumber OR recordNumber".to_string()));
    }

    #[tokio::test]
    async fn test_absent_coordinates_hinted_not_required() {
        let rs = RecordSet::from_columns(indexmap! {
            "scientificName".to_string() => column(&["Acacia dealbata"]),
            "occurrenceID".to_string() => column(&["1"]),
            "eventDate".to_string() => column(&["2020-01-01"]),
            "basisOfRecord".to_string() => column(&["HumanObservation"]),
        })
        .unwrap();
        let report = validator().validate_occurrence(&rs).await.unwrap();

        assert!(report
            .missing_columns
            .contains(&"MAYBE: decimalLatitude".to_string()));
        assert!(report
            .missing_columns
            .contains(&"MAYBE: decimalLongitude".to_string()));
        assert!(!report.coordinates_report.unwrap().has_coordinates_fields);
    }

    #[tokio::test]
    async fn test_occurrence_without_scientific_name_skips_taxonomy() {
        let rs = RecordSet::from_columns(indexmap! {
            "occurrenceID".to_string() => column(&["1"]),
            "eventDate".to_string() => column(&["2020-01-01"]),
        })
        .unwrap();
        let report = validator().validate_occurrence(&rs).await.unwrap();
        assert!(report.taxonomy_report.is_none());
    }

    #[tokio::test]
    async fn test_event_report() {
        let rs = RecordSet::from_columns(indexmap! {
            "eventID".to_string() => column(&["e1", "e2", "e2"]),
            "eventDate".to_string() => column(&["2020-01-01", "2020-01-02", "bad"]),
            "basisOfRecord".to_string() => column(&["HumanObservation", "x", "y"]),
            "scientificName".to_string() => column(&["a", "b", "c"]),
        })
        .unwrap();
        let report = validator().validate_event(&rs).await.unwrap();

        assert_eq!(report.record_type, RecordType::Event);
        // duplicated eventID: one repeat flagged
        assert_eq!(report.record_error_count, 1);
        assert!(report.all_required_columns_present);
        assert_eq!(report.datetime_report.num_invalid_datetime, 1);
        assert!(report.taxonomy_report.is_none());
        assert!(report.vocab_reports.is_empty());
    }

    #[tokio::test]
    async fn test_extension_kinds_use_their_column_profiles() {
        let rs = RecordSet::from_columns(indexmap! {
            "occurrenceID".to_string() => column(&["1"]),
            "identifier".to_string() => column(&["img-1"]),
        })
        .unwrap();
        let v = validator();

        let occurrence = v
            .validate_extension(&rs, ExtensionKind::OccurrenceMultimedia)
            .unwrap();
        assert!(occurrence.all_required_columns_present);

        let event = v
            .validate_extension(&rs, ExtensionKind::EventMultimedia)
            .unwrap();
        assert_eq!(event.missing_columns, vec!["eventID"]);

        let emof = v
            .validate_extension(&rs, ExtensionKind::ExtendedMeasurementOrFact)
            .unwrap();
        assert!(!emof.all_required_columns_present);
        assert!(emof
            .missing_columns
            .contains(&"measurementValue".to_string()));
    }

    #[tokio::test]
    async fn test_empty_record_set_rejected() {
        let rs = RecordSet::from_columns(IndexMap::new()).unwrap();
        let err = validator().validate_occurrence(&rs).await.unwrap_err();
        assert!(matches!(err, ValidatorError::EmptyData(_)));
    }
}

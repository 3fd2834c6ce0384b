//! Darwin Core vocabularies: required-column profiles, controlled value
//! lists, and the recommended term registry used for column-name checks.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Candidate fields that can serve as the unique row identifier of an
/// occurrence record.
pub const UNIQUE_ID_FIELDS: &[&str] = &["occurrenceID", "catalogNumber", "recordNumber"];

/// Taxonomy columns expected on an occurrence core. `vernacularName` is
/// optional and excluded from missing-column and trust calculations.
pub const REQUIRED_TAXONOMY_COLUMNS: &[&str] = &[
    "scientificName",
    "vernacularName",
    "genus",
    "family",
    "order",
    "class",
    "phylum",
    "kingdom",
];

/// Spatial columns expected on an occurrence core.
pub const REQUIRED_SPATIAL_COLUMNS: &[&str] = &[
    "decimalLatitude",
    "decimalLongitude",
    "geodeticDatum",
    "coordinateUncertaintyInMeters",
];

/// Remaining columns required on an occurrence core.
pub const REQUIRED_OTHER_OCCURRENCE_COLUMNS: &[&str] =
    &["basisOfRecord", "scientificName", "eventDate"];

/// Columns required on an event core.
pub const REQUIRED_EVENT_COLUMNS: &[&str] =
    &["basisOfRecord", "scientificName", "eventDate", "eventID"];

/// Columns required on a multimedia extension of an occurrence core.
pub const REQUIRED_MULTIMEDIA_COLUMNS_OCCURRENCE: &[&str] = &["occurrenceID", "identifier"];

/// Columns required on a multimedia extension of an event core.
pub const REQUIRED_MULTIMEDIA_COLUMNS_EVENT: &[&str] =
    &["eventID", "occurrenceID", "identifier"];

/// Columns required on an extended measurement-or-fact extension.
pub const REQUIRED_EMOF_COLUMNS: &[&str] = &[
    "eventID",
    "occurrenceID",
    "measurementID",
    "measurementType",
    "measurementValue",
    "measurementUnit",
    "measurementAccuracy",
];

/// Controlled vocabulary for the Darwin Core term `basisOfRecord`.
pub const BASIS_OF_RECORD_VOCABULARY: &[&str] = &[
    "PreservedSpecimen",
    "FossilSpecimen",
    "LivingSpecimen",
    "HumanObservation",
    "MachineObservation",
    "Observation",
    "MaterialSample",
    "Occurrence",
];

/// Classification terms echoed by the name-matching service.
///
/// The service spells the class field "classs" in classification payloads
/// because "class" is reserved in its backend.
pub const TAXON_CLASSIFICATION_TERMS: &[&str] = &[
    "scientificName",
    "rank",
    "species",
    "genus",
    "family",
    "order",
    "classs",
    "phylum",
    "kingdom",
];

/// Named geodetic datums accepted for `geodeticDatum`.
const GEODETIC_DATUM_NAMES: &[&str] = &[
    "WGS84", "NAD83", "ETRS89", "ITRF", "GDA94", "ED50", "NAD27", "AGD66", "AGD84",
];

/// EPSG code ranges accepted for `geodeticDatum` (AGD AMG zones, GDA94 MGA
/// zones and WGS84 UTM zones).
const GEODETIC_DATUM_EPSG_RANGES: &[(u32, u32)] = &[
    (20248, 20258),
    (20348, 20358),
    (28348, 28357),
    (32601, 32660),
    (32701, 32760),
];

/// Controlled vocabulary for the Darwin Core term `geodeticDatum`.
pub static GEODETIC_DATUM_VOCABULARY: Lazy<Vec<String>> = Lazy::new(|| {
    let mut vocab: Vec<String> = GEODETIC_DATUM_NAMES.iter().map(|s| s.to_string()).collect();
    for &(start, end) in GEODETIC_DATUM_EPSG_RANGES {
        for code in start..=end {
            vocab.push(format!("EPSG:{}", code));
        }
    }
    vocab
});

/// Recommended Darwin Core term names (local names), per the TDWG term
/// registry, plus the Dublin Core terms that appear in archive extensions.
const DWC_RECOMMENDED_TERMS: &[&str] = &[
    // Record-level
    "type",
    "modified",
    "language",
    "license",
    "rightsHolder",
    "accessRights",
    "bibliographicCitation",
    "references",
    "institutionID",
    "collectionID",
    "datasetID",
    "institutionCode",
    "collectionCode",
    "datasetName",
    "ownerInstitutionCode",
    "basisOfRecord",
    "informationWithheld",
    "dataGeneralizations",
    "dynamicProperties",
    // Occurrence
    "occurrenceID",
    "catalogNumber",
    "recordNumber",
    "recordedBy",
    "recordedByID",
    "individualCount",
    "organismQuantity",
    "organismQuantityType",
    "sex",
    "lifeStage",
    "reproductiveCondition",
    "caste",
    "behavior",
    "vitality",
    "establishmentMeans",
    "degreeOfEstablishment",
    "pathway",
    "georeferenceVerificationStatus",
    "occurrenceStatus",
    "preparations",
    "disposition",
    "associatedMedia",
    "associatedOccurrences",
    "associatedReferences",
    "associatedSequences",
    "associatedTaxa",
    "otherCatalogNumbers",
    "occurrenceRemarks",
    // Organism
    "organismID",
    "organismName",
    "organismScope",
    "associatedOrganisms",
    "previousIdentifications",
    "organismRemarks",
    // MaterialSample
    "materialSampleID",
    // Event
    "eventID",
    "parentEventID",
    "eventType",
    "fieldNumber",
    "eventDate",
    "eventTime",
    "startDayOfYear",
    "endDayOfYear",
    "year",
    "month",
    "day",
    "verbatimEventDate",
    "habitat",
    "samplingProtocol",
    "sampleSizeValue",
    "sampleSizeUnit",
    "samplingEffort",
    "fieldNotes",
    "eventRemarks",
    // Location
    "locationID",
    "higherGeographyID",
    "higherGeography",
    "continent",
    "waterBody",
    "islandGroup",
    "island",
    "country",
    "countryCode",
    "stateProvince",
    "county",
    "municipality",
    "locality",
    "verbatimLocality",
    "minimumElevationInMeters",
    "maximumElevationInMeters",
    "verbatimElevation",
    "verticalDatum",
    "minimumDepthInMeters",
    "maximumDepthInMeters",
    "verbatimDepth",
    "minimumDistanceAboveSurfaceInMeters",
    "maximumDistanceAboveSurfaceInMeters",
    "locationAccordingTo",
    "locationRemarks",
    "decimalLatitude",
    "decimalLongitude",
    "geodeticDatum",
    "coordinateUncertaintyInMeters",
    "coordinatePrecision",
    "pointRadiusSpatialFit",
    "verbatimCoordinates",
    "verbatimLatitude",
    "verbatimLongitude",
    "verbatimCoordinateSystem",
    "verbatimSRS",
    "footprintWKT",
    "footprintSRS",
    "footprintSpatialFit",
    "georeferencedBy",
    "georeferencedDate",
    "georeferenceProtocol",
    "georeferenceSources",
    "georeferenceRemarks",
    // GeologicalContext
    "geologicalContextID",
    "earliestEonOrLowestEonothem",
    "latestEonOrHighestEonothem",
    "earliestEraOrLowestErathem",
    "latestEraOrHighestErathem",
    "earliestPeriodOrLowestSystem",
    "latestPeriodOrHighestSystem",
    "earliestEpochOrLowestSeries",
    "latestEpochOrHighestSeries",
    "earliestAgeOrLowestStage",
    "latestAgeOrHighestStage",
    "lowestBiostratigraphicZone",
    "highestBiostratigraphicZone",
    "lithostratigraphicTerms",
    "group",
    "formation",
    "member",
    "bed",
    // Identification
    "identificationID",
    "verbatimIdentification",
    "identificationQualifier",
    "typeStatus",
    "identifiedBy",
    "identifiedByID",
    "dateIdentified",
    "identificationReferences",
    "identificationVerificationStatus",
    "identificationRemarks",
    // Taxon
    "taxonID",
    "scientificNameID",
    "acceptedNameUsageID",
    "parentNameUsageID",
    "originalNameUsageID",
    "nameAccordingToID",
    "namePublishedInID",
    "taxonConceptID",
    "scientificName",
    "acceptedNameUsage",
    "parentNameUsage",
    "originalNameUsage",
    "nameAccordingTo",
    "namePublishedIn",
    "namePublishedInYear",
    "higherClassification",
    "kingdom",
    "phylum",
    "class",
    "order",
    "superfamily",
    "family",
    "subfamily",
    "tribe",
    "subtribe",
    "genus",
    "genericName",
    "subgenus",
    "infragenericEpithet",
    "specificEpithet",
    "infraspecificEpithet",
    "cultivarEpithet",
    "taxonRank",
    "verbatimTaxonRank",
    "scientificNameAuthorship",
    "vernacularName",
    "nomenclaturalCode",
    "taxonomicStatus",
    "nomenclaturalStatus",
    "taxonRemarks",
    // MeasurementOrFact
    "measurementID",
    "parentMeasurementID",
    "measurementType",
    "measurementValue",
    "measurementAccuracy",
    "measurementUnit",
    "measurementDeterminedBy",
    "measurementDeterminedDate",
    "measurementMethod",
    "measurementRemarks",
    // ResourceRelationship
    "resourceRelationshipID",
    "resourceID",
    "relationshipOfResourceID",
    "relatedResourceID",
    "relationshipOfResource",
    "relationshipAccordingTo",
    "relationshipEstablishedDate",
    "relationshipRemarks",
    // Dublin Core terms used by archive extensions
    "identifier",
    "format",
    "created",
    "creator",
    "contributor",
    "publisher",
    "audience",
    "source",
    "title",
    "description",
];

/// Registry of recognized Darwin Core term names.
///
/// The default registry embeds the recommended term list; tests and
/// callers with a newer registry snapshot can supply their own.
#[derive(Debug, Clone)]
pub struct DwcTermRegistry {
    terms: HashSet<String>,
}

impl DwcTermRegistry {
    /// Build a registry from an explicit term list.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a column name is a recognized term.
    pub fn contains(&self, name: &str) -> bool {
        self.terms.contains(name)
    }

    /// Number of registered terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for DwcTermRegistry {
    fn default() -> Self {
        Self::from_terms(DWC_RECOMMENDED_TERMS.iter().copied())
    }
}

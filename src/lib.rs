//! Darwin Core dataset validation for occurrence and event records.
//!
//! The validator inspects a tabular record set against the Darwin Core
//! standard: required-column profiles, term compliance, identifier
//! uniqueness, coordinate and date validity, controlled vocabularies, and
//! taxonomic name resolution against an external name-matching backbone.
//!
//! # Core Principles
//!
//! - **Non-destructive**: record sets are never modified, only reported on
//! - **Recoverable**: a name the backbone cannot resolve is reported as
//!   unresolved, never a process failure
//! - **Bounded**: external lookups run under a concurrency cap, per-call
//!   timeouts and an overall deadline
//!
//! # Example
//!
//! ```no_run
//! use dwc_validator::{AlaNameMatchClient, DwcValidator, Parser};
//!
//! # async fn run() -> dwc_validator::Result<()> {
//! let records = Parser::new().parse_file("occurrences.csv")?;
//! let validator = DwcValidator::new(AlaNameMatchClient::new()?);
//! let report = validator.validate_occurrence(&records).await?;
//!
//! println!("{} records, {} in error", report.record_count, report.record_error_count);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod input;
pub mod report;
pub mod taxonomy;
pub mod validators;
pub mod vocab;

mod validator;

pub use error::{Result, ValidatorError};
pub use input::{Parser, ParserConfig, RecordSet, Value};
pub use report::{
    CoordinatesReport, DateTimeReport, ExtensionReport, RecordType, TaxonResolution, TaxonStatus,
    TaxonomyReport, ValidationReport, VocabularyReport,
};
pub use taxonomy::{
    AlaNameMatchClient, MockNameMatchClient, NameMatchClient, ResolverConfig, TaxonomyResolver,
};
pub use validator::{DwcValidator, ExtensionKind, ValidatorConfig};

//! Independent sub-validators whose results are merged into one report.
//!
//! All of these are pure functions over an immutable record set: safe to
//! run concurrently across datasets, and within a dataset they have no
//! data dependency on each other.

mod coordinates;
mod datetime;
mod identifier;
mod population;
mod schema;
mod vocabulary;

pub use coordinates::generate_coordinates_report;
pub use datetime::create_datetime_report;
pub use identifier::check_id_fields;
pub use population::{field_populated_counts, populated_counts_for, records_with_any_populated};
pub use schema::{missing_required_columns, non_compliant_terms};
pub use vocabulary::create_vocabulary_report;

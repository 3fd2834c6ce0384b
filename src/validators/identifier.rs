//! Row-identifier presence and uniqueness checking.

use std::collections::HashSet;

use crate::input::{RecordSet, Value};

/// Check that a unique identifier field is present, fully populated, and
/// unique, returning the number of rows in error.
///
/// `id_fields` is an ordered list of candidate identifier fields (for
/// occurrences: `occurrenceID`, `catalogNumber` or `recordNumber`).
/// `id_term` names the candidate whose physical column an upstream
/// archive reader renamed to a generic `id` column.
///
/// Refuse-to-guess policy: when no candidate is supplied, none is
/// present, or more than one is present simultaneously, the entire
/// dataset is flagged.
pub fn check_id_fields(
    record_set: &RecordSet,
    id_fields: &[&str],
    id_term: Option<&str>,
) -> usize {
    let total = record_set.row_count();
    if id_fields.is_empty() {
        return total;
    }

    // A candidate is present either under its own name or, for the
    // renamed term, under the generic "id" column.
    let present: Vec<&[Value]> = id_fields
        .iter()
        .filter_map(|field| {
            if id_term == Some(*field) {
                record_set.column("id")
            } else {
                record_set.column(field)
            }
        })
        .collect();

    let column = match present.as_slice() {
        [] => return total,
        [column] => *column,
        _ => return total,
    };

    let null_count = column.iter().filter(|v| v.is_null()).count();
    if null_count > 0 {
        return null_count;
    }

    // Fully populated: count repeats of already-seen values. The first
    // occurrence of a duplicated value is not flagged.
    let mut seen = HashSet::new();
    let mut duplicate_rows = 0;
    for value in column {
        if let Some(key) = value.identity_key() {
            if !seen.insert(key) {
                duplicate_rows += 1;
            }
        }
    }
    duplicate_rows
}

//! Field population counting.

use indexmap::IndexMap;

use crate::input::RecordSet;
use crate::report::ColumnProfile;

/// Count the populated values of every column, in column order.
pub fn field_populated_counts(record_set: &RecordSet) -> ColumnProfile {
    record_set
        .column_names()
        .map(|name| (name.to_string(), record_set.populated_count(name)))
        .collect()
}

/// Populated-row counts for a specific field list.
///
/// When none of the fields exist, every field reports zero. Otherwise
/// only the fields present in the record set appear in the result.
pub fn populated_counts_for(record_set: &RecordSet, fields: &[&str]) -> IndexMap<String, usize> {
    if !fields.iter().any(|f| record_set.has_column(f)) {
        return fields.iter().map(|f| (f.to_string(), 0)).collect();
    }

    fields
        .iter()
        .filter(|f| record_set.has_column(f))
        .map(|f| (f.to_string(), record_set.populated_count(f)))
        .collect()
}

/// Rows with at least one of the listed fields populated. All fields
/// absent counts as zero rows.
pub fn records_with_any_populated(record_set: &RecordSet, fields: &[&str]) -> usize {
    let present: Vec<_> = fields
        .iter()
        .filter_map(|f| record_set.column(f))
        .collect();
    if present.is_empty() {
        return 0;
    }

    (0..record_set.row_count())
        .filter(|&row| present.iter().any(|col| !col[row].is_null()))
        .count()
}

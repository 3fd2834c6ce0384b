//! Generic case-insensitive controlled-vocabulary matching.

use std::collections::{BTreeSet, HashSet};

use crate::input::{RecordSet, Value};
use crate::report::VocabularyReport;

/// Maximum distinct sample values reported for a field.
const MAX_SAMPLE_VALUES: usize = 10;

/// Count the records whose value in `field` matches the controlled
/// vocabulary case-insensitively.
///
/// Invariant: `recognised + unrecognised + null_count == record_count`.
/// The sample list holds up to 10 distinct non-matching values with their
/// original casing, sorted, never containing the null sentinel. Columns
/// holding non-textual cells degrade to an empty sample list instead of
/// raising.
pub fn create_vocabulary_report(
    record_set: &RecordSet,
    field: &str,
    controlled_vocabulary: &[impl AsRef<str>],
) -> VocabularyReport {
    let Some(values) = record_set.column(field) else {
        return VocabularyReport {
            field: field.to_string(),
            has_field: false,
            recognised_count: 0,
            unrecognised_count: 0,
            non_matching_values: Vec::new(),
        };
    };

    let vocabulary_lower: HashSet<String> = controlled_vocabulary
        .iter()
        .map(|v| v.as_ref().to_lowercase())
        .collect();

    let null_count = values.iter().filter(|v| v.is_null()).count();
    let recognised_count = values
        .iter()
        .filter_map(|v| v.as_text())
        .filter(|s| vocabulary_lower.contains(&s.to_lowercase()))
        .count();

    let coercible = values
        .iter()
        .all(|v| v.is_null() || matches!(v, Value::Text(_)));
    let non_matching_values = if coercible {
        let distinct: BTreeSet<&str> = values
            .iter()
            .filter_map(|v| v.as_text())
            .filter(|s| !vocabulary_lower.contains(&s.to_lowercase()))
            .collect();
        distinct
            .into_iter()
            .take(MAX_SAMPLE_VALUES)
            .map(|s| s.to_string())
            .collect()
    } else {
        Vec::new()
    };

    VocabularyReport {
        field: field.to_string(),
        has_field: true,
        recognised_count,
        unrecognised_count: record_set.row_count() - (null_count + recognised_count),
        non_matching_values,
    }
}

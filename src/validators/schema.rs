//! Required-column and term-compliance checks.

use crate::input::RecordSet;
use crate::vocab::DwcTermRegistry;

/// Required columns absent from the record set, in required-list order.
///
/// Existing contract: when the required list and the record set's columns
/// share no names at all, the check is skipped and an empty list is
/// returned rather than flagging every required column. The return value
/// is always a list, never an absent value.
pub fn missing_required_columns(record_set: &RecordSet, required: &[&str]) -> Vec<String> {
    if !required.iter().any(|f| record_set.has_column(f)) {
        return Vec::new();
    }

    required
        .iter()
        .filter(|f| !record_set.has_column(f))
        .map(|f| f.to_string())
        .collect()
}

/// Column names that are not recognized Darwin Core terms, in column order.
pub fn non_compliant_terms(record_set: &RecordSet, registry: &DwcTermRegistry) -> Vec<String> {
    record_set
        .column_names()
        .filter(|name| !registry.contains(name))
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;
    use indexmap::indexmap;

    fn record_set(columns: &[&str]) -> RecordSet {
        RecordSet::from_columns(
            columns
                .iter()
                .map(|c| (c.to_string(), vec![Value::from("x")]))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_subset_reported() {
        let rs = record_set(&["a", "c"]);
        assert_eq!(missing_required_columns(&rs, &["a", "b"]), vec!["b"]);
    }

    #[test]
    fn test_all_present_is_empty() {
        let rs = record_set(&["a", "b"]);
        assert!(missing_required_columns(&rs, &["a", "b"]).is_empty());
    }

    #[test]
    fn test_no_overlap_skips_check() {
        // No shared names: check is skipped, not reported as all-missing.
        let rs = record_set(&["x", "y"]);
        assert!(missing_required_columns(&rs, &["a", "b"]).is_empty());
    }

    #[test]
    fn test_non_compliant_terms() {
        let rs = record_set(&["scientificName", "my_notes", "eventDate"]);
        let registry = DwcTermRegistry::default();
        assert_eq!(non_compliant_terms(&rs, &registry), vec!["my_notes"]);
    }
}

//! Structural `eventDate` validation.
//!
//! This check is purely structural: date tokens must split on `-` into
//! segments of lengths 4/2/2 and time tokens on `:` into 2/2/2. It never
//! checks numeric ranges (month 1-12, day validity for a month).

use crate::input::{RecordSet, Value};
use crate::report::DateTimeReport;

const EVENT_DATE: &str = "eventDate";

/// Underlying cell type, for the column-uniformity census.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CellKind {
    Null,
    Text,
    Number,
    Timestamp,
}

impl CellKind {
    fn of(value: &Value) -> Self {
        if value.is_null() {
            return CellKind::Null;
        }
        match value {
            Value::Null => CellKind::Null,
            Value::Text(_) => CellKind::Text,
            Value::Number(_) => CellKind::Number,
            Value::Timestamp(_) => CellKind::Timestamp,
        }
    }
}

/// Check the structural validity of the `eventDate` column.
///
/// Column absent: every row is invalid. Mixed underlying types (nulls
/// included, mirroring how frame readers store missing values as a
/// distinct type): only the textual values are counted invalid. A column
/// of uniformly non-textual values (already-parsed temporals included)
/// is wholly invalid.
pub fn create_datetime_report(record_set: &RecordSet) -> DateTimeReport {
    let Some(values) = record_set.column(EVENT_DATE) else {
        return DateTimeReport {
            has_invalid_datetime: true,
            num_invalid_datetime: record_set.row_count(),
        };
    };

    let mut kinds: Vec<CellKind> = values.iter().map(CellKind::of).collect();
    kinds.sort_unstable_by_key(|k| *k as u8);
    kinds.dedup();

    match kinds.as_slice() {
        [] => DateTimeReport {
            has_invalid_datetime: false,
            num_invalid_datetime: 0,
        },
        [CellKind::Text] => {
            let invalid = values
                .iter()
                .filter_map(|v| v.as_text())
                .filter(|s| !is_structurally_valid(s))
                .count();
            DateTimeReport {
                has_invalid_datetime: invalid > 0,
                num_invalid_datetime: invalid,
            }
        }
        [_] => DateTimeReport {
            has_invalid_datetime: true,
            num_invalid_datetime: record_set.row_count(),
        },
        _ => {
            // Mixed types: only the textual values are counted.
            let text_count = values
                .iter()
                .filter(|v| CellKind::of(v) == CellKind::Text)
                .count();
            DateTimeReport {
                has_invalid_datetime: true,
                num_invalid_datetime: text_count,
            }
        }
    }
}

/// Structural token check: `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
fn is_structurally_valid(value: &str) -> bool {
    if let Some((date, time)) = value.split_once('T') {
        // The time part is not examined once the date part fails.
        if !date_segments_valid(date) {
            return false;
        }
        time_segments_valid(time)
    } else if value.contains('-') {
        date_segments_valid(value)
    } else {
        false
    }
}

fn date_segments_valid(date: &str) -> bool {
    let segments: Vec<&str> = date.split('-').collect();
    segments.len() == 3
        && segments[0].len() == 4
        && segments[1].len() == 2
        && segments[2].len() == 2
}

fn time_segments_valid(time: &str) -> bool {
    let segments: Vec<&str> = time.split(':').collect();
    segments.len() == 3
        && segments[0].len() == 2
        && segments[1].len() == 2
        && segments[2].len() == 2
}

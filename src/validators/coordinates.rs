//! Coordinate range validation.

use crate::input::{RecordSet, Value};
use crate::report::CoordinatesReport;

const LATITUDE: &str = "decimalLatitude";
const LONGITUDE: &str = "decimalLongitude";

/// Check `decimalLatitude` and `decimalLongitude` for numeric validity and
/// range ([-90, 90] and [-180, 180], inclusive).
///
/// Non-numeric values coerce to an invalid sentinel rather than an error;
/// the invalid count conflates non-numeric and out-of-range values. A
/// clean dataset still reports `has_coordinates_fields=true` with zero
/// counts: absence of error is a positive, reportable state.
pub fn generate_coordinates_report(record_set: &RecordSet) -> CoordinatesReport {
    let (Some(lat), Some(lon)) = (record_set.column(LATITUDE), record_set.column(LONGITUDE))
    else {
        return CoordinatesReport {
            has_coordinates_fields: false,
            invalid_decimal_latitude_count: 0,
            invalid_decimal_longitude_count: 0,
        };
    };

    CoordinatesReport {
        has_coordinates_fields: true,
        invalid_decimal_latitude_count: invalid_count(lat, -90.0, 90.0),
        invalid_decimal_longitude_count: invalid_count(lon, -180.0, 180.0),
    }
}

/// Populated values that fail numeric coercion or fall outside the range.
fn invalid_count(values: &[Value], min: f64, max: f64) -> usize {
    let populated = values.iter().filter(|v| !v.is_null()).count();
    let in_range = values
        .iter()
        .filter(|v| !v.is_null())
        .filter(|v| {
            v.as_number()
                .map(|n| (min..=max).contains(&n))
                .unwrap_or(false)
        })
        .count();
    populated - in_range
}

//! Record set abstraction: typed, nullable, column-oriented tabular data.

use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::error::{Result, ValidatorError};

/// A single cell value in a record set.
///
/// Parsed files only ever contain `Null` and `Text` cells; `Number` and
/// `Timestamp` cells appear when a record set is built programmatically
/// from an upstream reader that has already coerced its columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    /// Textual value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Already-parsed temporal value.
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Whether this cell counts as unpopulated.
    ///
    /// Text cells carrying a null sentinel ("NA", "null", ...) count as
    /// unpopulated, matching how such markers are read from delimited files.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => is_null_sentinel(s),
            _ => false,
        }
    }

    /// The textual content of this cell, if it is populated text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) if !is_null_sentinel(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Coerce this cell to a number. Non-coercible values yield `None`
    /// rather than an error.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// A stable string key for equality checks across cell types.
    pub(crate) fn identity_key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => {
                if is_null_sentinel(s) {
                    None
                } else {
                    Some(s.clone())
                }
            }
            Value::Number(n) => Some(format!("{}", n)),
            Value::Timestamp(ts) => Some(ts.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        if is_null_sentinel(s) {
            Value::Null
        } else {
            Value::Text(s.to_string())
        }
    }
}

/// Check if a raw string represents a missing/null value.
pub fn is_null_sentinel(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
}

/// An immutable, ordered set of named columns with row-aligned nullable
/// values. The input to every validation pass; never mutated by them.
#[derive(Debug, Clone)]
pub struct RecordSet {
    columns: IndexMap<String, Vec<Value>>,
    row_count: usize,
}

impl RecordSet {
    /// Build a record set from an ordered column map.
    ///
    /// All columns must have the same length.
    pub fn from_columns(columns: IndexMap<String, Vec<Value>>) -> Result<Self> {
        let row_count = columns.values().next().map(|v| v.len()).unwrap_or(0);
        for (name, values) in &columns {
            if values.len() != row_count {
                return Err(ValidatorError::ShapeMismatch {
                    column: name.clone(),
                    expected: row_count,
                    actual: values.len(),
                });
            }
        }
        Ok(Self { columns, row_count })
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in their original order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }

    /// Whether a column with this exact name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// All values of a column, aligned by row index.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Count of populated (non-null) values in a column. Absent column
    /// counts as zero.
    pub fn populated_count(&self, name: &str) -> usize {
        self.column(name)
            .map(|values| values.iter().filter(|v| !v.is_null()).count())
            .unwrap_or(0)
    }

    /// Distinct populated text values of a column in first-seen order.
    pub fn distinct_text_values(&self, name: &str) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut distinct = Vec::new();
        if let Some(values) = self.column(name) {
            for value in values {
                if let Some(text) = value.as_text() {
                    if seen.insert(text.to_string()) {
                        distinct.push(text.to_string());
                    }
                }
            }
        }
        distinct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    fn text_column(values: &[&str]) -> Vec<Value> {
        values.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn test_null_sentinels() {
        assert!(Value::from("").is_null());
        assert!(Value::from("NA").is_null());
        assert!(Value::from("n/a").is_null());
        assert!(Value::from("NULL").is_null());
        assert!(!Value::from("value").is_null());
        assert!(!Value::from("0").is_null());
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::from("42.5").as_number(), Some(42.5));
        assert_eq!(Value::from("abc").as_number(), None);
        assert_eq!(Value::Number(7.0).as_number(), Some(7.0));
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let columns = indexmap! {
            "a".to_string() => text_column(&["1", "2"]),
            "b".to_string() => text_column(&["1"]),
        };
        assert!(RecordSet::from_columns(columns).is_err());
    }

    #[test]
    fn test_populated_and_distinct() {
        let columns = indexmap! {
            "name".to_string() => text_column(&["x", "", "y", "x"]),
        };
        let rs = RecordSet::from_columns(columns).unwrap();
        assert_eq!(rs.row_count(), 4);
        assert_eq!(rs.populated_count("name"), 3);
        assert_eq!(rs.distinct_text_values("name"), vec!["x", "y"]);
        assert_eq!(rs.populated_count("missing"), 0);
    }
}

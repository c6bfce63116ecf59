//! In-memory datasets handed to the engine.
//!
//! A dataset is one side of a reconciliation: either the BO ledger export or
//! the partner settlement export. Upstream parsing (file upload, CSV/Excel
//! decoding) happens outside this crate; by the time data reaches the
//! engine, every scalar has been coerced to its string form.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{KeyscoutError, Result};

/// One record: an ordered mapping from column name to string value.
pub type Row = IndexMap<String, String>;

/// An ordered sequence of rows from one side of the reconciliation.
///
/// Immutable once built; the engine never mutates its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset from already-coerced rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build a dataset from raw JSON records, one object per row.
    ///
    /// Scalar coercion follows one rule on both sides so overlap comparisons
    /// stay meaningful: strings are kept verbatim, numbers and booleans are
    /// rendered with their canonical textual form, and nulls are dropped
    /// entirely (a null never becomes an empty-string member).
    pub fn from_json(records: &[Value]) -> Result<Self> {
        let mut rows = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let Value::Object(fields) = record else {
                return Err(KeyscoutError::Ingest {
                    record: idx,
                    message: format!("expected a JSON object, got {}", json_kind(record)),
                });
            };
            let mut row = Row::with_capacity(fields.len());
            for (column, value) in fields {
                if let Some(text) = coerce_scalar(value) {
                    row.insert(column.clone(), text);
                }
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Parse a JSON array of records into a dataset.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<Value> = serde_json::from_str(json)?;
        Self::from_json(&records)
    }

    /// All rows, in input order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names, taken from the first row (rows within one export share
    /// the same columns). An empty dataset has no columns.
    pub fn column_names(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Value at a given row for a named column, if present.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column)).map(String::as_str)
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// Render a JSON scalar as the string the engine analyzes.
///
/// Returns `None` for null. Nested arrays/objects should not appear in
/// tabular exports but are rendered as compact JSON rather than rejected,
/// keeping ingestion total for anything row-shaped.
fn coerce_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_column_names_from_first_row() {
        let dataset = Dataset::new(vec![
            make_row(&[("ID Transaction", "TX100_CM"), ("Montant", "5000")]),
            make_row(&[("ID Transaction", "TX101_CM"), ("Montant", "7500")]),
        ]);

        assert_eq!(dataset.column_names(), vec!["ID Transaction", "Montant"]);
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn test_empty_dataset_has_no_columns() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert!(dataset.column_names().is_empty());
    }

    #[test]
    fn test_from_json_coerces_scalars() {
        let records = vec![json!({"id": "TX100", "amount": 5000, "settled": true})];
        let dataset = Dataset::from_json(&records).unwrap();

        assert_eq!(dataset.value(0, "id"), Some("TX100"));
        assert_eq!(dataset.value(0, "amount"), Some("5000"));
        assert_eq!(dataset.value(0, "settled"), Some("true"));
    }

    #[test]
    fn test_from_json_drops_nulls() {
        let records = vec![json!({"id": "TX100", "agency": null})];
        let dataset = Dataset::from_json(&records).unwrap();

        assert_eq!(dataset.value(0, "agency"), None);
        assert_eq!(dataset.column_names(), vec!["id"]);
    }

    #[test]
    fn test_from_json_rejects_non_object_record() {
        let records = vec![json!("TX100")];
        let err = Dataset::from_json(&records).unwrap_err();
        assert!(matches!(err, KeyscoutError::Ingest { record: 0, .. }));
    }

    #[test]
    fn test_from_json_str() {
        let dataset =
            Dataset::from_json_str(r#"[{"id": "TX100"}, {"id": "TX101"}]"#).unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.value(1, "id"), Some("TX101"));
    }

    #[test]
    fn test_from_json_str_propagates_parse_error() {
        assert!(matches!(
            Dataset::from_json_str("not json"),
            Err(KeyscoutError::Json(_))
        ));
    }
}

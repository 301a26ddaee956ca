//! Result set types.

use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell, typed by SQLite storage class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(v) => SqlValue::Integer(v),
            ValueRef::Real(v) => SqlValue::Real(v),
            ValueRef::Text(bytes) => SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Integer(v) => write!(f, "{}", v),
            SqlValue::Real(v) => write!(f, "{}", v),
            SqlValue::Text(s) => write!(f, "{}", s),
            SqlValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Rows plus column names from one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOutput {
    /// Column names in result order
    pub columns: Vec<String>,

    /// Rows, each with `columns.len()` values
    pub rows: Vec<Vec<SqlValue>>,
}

impl QueryOutput {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of the first column of the first row, for scalar queries
    /// such as `SELECT COUNT(*) ...`.
    pub fn scalar(&self) -> Option<&SqlValue> {
        self.rows.first().and_then(|row| row.first())
    }

    /// Pair each row's values with their column names.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, &SqlValue)>> + '_ {
        self.rows.iter().map(move |row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_serialization() {
        let row = vec![
            SqlValue::Text("Dilsha".into()),
            SqlValue::Integer(99),
            SqlValue::Real(82.2),
            SqlValue::Null,
        ];
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"["Dilsha",99,82.2,null]"#
        );
    }

    #[test]
    fn test_records_pair_columns() {
        let output = QueryOutput {
            columns: vec!["name".into(), "marks".into()],
            rows: vec![vec![SqlValue::Text("Sibin".into()), SqlValue::Integer(89)]],
        };

        let records: Vec<_> = output.records().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0][1], ("marks", &SqlValue::Integer(89)));
        assert_eq!(output.scalar(), Some(&SqlValue::Text("Sibin".into())));
    }
}

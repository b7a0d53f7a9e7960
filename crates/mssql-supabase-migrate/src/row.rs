//! Row representation produced by the source reader.

use std::sync::Arc;

use crate::value::{SqlNullType, SqlValue};

/// One row read from the source database.
///
/// The column name list is shared across every row of a result set so a
/// 100k-row extract does not carry 100k copies of the header.
#[derive(Debug, Clone)]
pub struct SourceRow {
    columns: Arc<Vec<String>>,
    values: Vec<SqlValue>,
}

impl SourceRow {
    pub fn new(columns: Arc<Vec<String>>, values: Vec<SqlValue>) -> Self {
        SourceRow { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Value of a named column. Missing columns read as a typed NULL so
    /// transforms fall through to their defaults instead of erroring.
    pub fn get(&self, column: &str) -> &SqlValue {
        static NULL: SqlValue = SqlValue::Null(SqlNullType::String);
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
            .unwrap_or(&NULL)
    }

    pub fn try_get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }
}

//! SQL value enum shared between the source reader and the target writer.

use rust_decimal::Decimal;

/// SQL value enum for type-safe row handling.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null(SqlNullType),
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Uuid(uuid::Uuid),
    Decimal(Decimal),
    DateTime(chrono::NaiveDateTime),
    DateTimeOffset(chrono::DateTime<chrono::FixedOffset>),
    Date(chrono::NaiveDate),
    Time(chrono::NaiveTime),
}

/// Type hint for NULL values to ensure correct PostgreSQL encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlNullType {
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Bytes,
    Uuid,
    Decimal,
    DateTime,
    DateTimeOffset,
    Date,
    Time,
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null(_))
    }

    /// Integer view of the value, when it has one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::I16(n) => Some(*n as i64),
            SqlValue::I32(n) => Some(*n as i64),
            SqlValue::I64(n) => Some(*n),
            SqlValue::Bool(b) => Some(*b as i64),
            SqlValue::Decimal(d) => {
                use rust_decimal::prelude::ToPrimitive;
                d.to_i64()
            }
            SqlValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Textual form used for lookup keys and row identifiers.
    ///
    /// Numbers render without padding and strings are trimmed, so a key read
    /// from SQL Server compares equal to the same key read back from Postgres
    /// regardless of char(n) padding on either side.
    pub fn key_string(&self) -> String {
        match self {
            SqlValue::Null(_) => String::new(),
            SqlValue::Bool(b) => (*b as i32).to_string(),
            SqlValue::I16(n) => n.to_string(),
            SqlValue::I32(n) => n.to_string(),
            SqlValue::I64(n) => n.to_string(),
            SqlValue::F32(n) => n.to_string(),
            SqlValue::F64(n) => n.to_string(),
            SqlValue::String(s) => s.trim().to_string(),
            SqlValue::Bytes(b) => hex::encode(b),
            SqlValue::Uuid(u) => u.to_string(),
            SqlValue::Decimal(d) => d.normalize().to_string(),
            SqlValue::DateTime(dt) => dt.to_string(),
            SqlValue::DateTimeOffset(dt) => dt.to_rfc3339(),
            SqlValue::Date(d) => d.to_string(),
            SqlValue::Time(t) => t.to_string(),
        }
    }

    /// Truthiness the way the legacy database encodes flags: true booleans,
    /// the number 1 and the literal strings "S" / "1" (case-insensitive) are
    /// true; NULL and everything else is false. Binary blobs are bit flags
    /// stored as raw bytes, true when any byte is set.
    pub fn is_truthy(&self) -> bool {
        match self {
            SqlValue::Null(_) => false,
            SqlValue::Bool(b) => *b,
            SqlValue::Bytes(b) => b.iter().any(|&x| x != 0),
            SqlValue::String(s) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("s") || s == "1"
            }
            other => other.as_i64() == Some(1),
        }
    }
}

/// Escape a string for SQL literal use.
pub(crate) fn escape_sql_string(s: &str) -> String {
    s.replace('\'', "''")
}

/// Convert SqlValue to SQL literal string.
pub(crate) fn sql_value_to_literal(value: &SqlValue) -> String {
    match value {
        SqlValue::Null(_) => "NULL".to_string(),
        SqlValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        SqlValue::I16(n) => n.to_string(),
        SqlValue::I32(n) => n.to_string(),
        SqlValue::I64(n) => n.to_string(),
        SqlValue::F32(n) => n.to_string(),
        SqlValue::F64(n) => n.to_string(),
        SqlValue::String(s) => format!("'{}'", escape_sql_string(s)),
        SqlValue::Bytes(b) => format!("'\\x{}'::bytea", hex::encode(b)),
        SqlValue::Uuid(u) => format!("'{}'::uuid", u),
        SqlValue::Decimal(d) => format!("{}::numeric", d),
        SqlValue::DateTime(dt) => format!("'{}'::timestamp", dt.format("%Y-%m-%d %H:%M:%S%.6f")),
        SqlValue::DateTimeOffset(dt) => format!("'{}'::timestamptz", dt.to_rfc3339()),
        SqlValue::Date(d) => format!("'{}'::date", d),
        SqlValue::Time(t) => format!("'{}'::time", t),
    }
}

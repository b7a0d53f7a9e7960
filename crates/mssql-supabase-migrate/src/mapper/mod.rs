//! Declarative field mapping from source rows to target rows.
//!
//! A migration unit describes its target shape as a list of [`FieldSpec`]s.
//! Each spec names the target column and the transform that produces its
//! value. Transforms are data, not closures, so a unit definition reads like
//! the column mapping table it replaces and can be inspected in tests.

use std::collections::HashMap;

use crate::resolver::{composite_key, ReferenceMap};
use crate::report::{Skip, SkipReason};
use crate::row::SourceRow;
use crate::value::{SqlNullType, SqlValue};

/// What to do when a foreign key lookup finds nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum FkFallback {
    /// Substitute a fixed sentinel row id (legacy "sin tarjeta" style zeros).
    Sentinel(i64),
    /// Leave the column NULL.
    Null,
    /// Skip the whole row; the target schema rejects a dangling reference.
    Required,
}

/// One column transform.
#[derive(Debug, Clone)]
pub enum Transform {
    /// Copy the source value as-is.
    Copy(String),
    /// Trim a string; empty or NULL becomes NULL.
    Trim(String),
    /// Trim a string; empty or NULL becomes the given default (NOT NULL text
    /// columns that the legacy data leaves blank).
    TrimOr(String, &'static str),
    /// Render the value as trimmed text (document numbers stored as numerics).
    Text(String),
    /// Legacy flag to boolean: non-zero numbers and "S"/"1" are true.
    Bool(String),
    /// True when the source column is NULL (active = no termination date).
    IsNull(String),
    /// Copy, substituting a default when the source is NULL.
    Or(String, SqlValue),
    /// Fixed value for every row.
    Const(SqlValue),
    /// Date part of a datetime column.
    DateOnly(String),
    /// Map a coded value through a fixed table, with optional fallback code.
    EnumMap {
        source: String,
        table: Vec<(&'static str, &'static str)>,
        fallback: Option<&'static str>,
    },
    /// Replace source key column(s) with the id found in a reference map.
    Lookup {
        sources: Vec<String>,
        map: String,
        fallback: FkFallback,
    },
    /// Apply the inner transform only when a discriminator column holds the
    /// given value; otherwise the column is NULL.
    Guard {
        source: String,
        equals: i64,
        then: Box<Transform>,
    },
}

/// Target column plus the transform that fills it.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub target: String,
    pub transform: Transform,
}

impl FieldSpec {
    pub fn new(target: impl Into<String>, transform: Transform) -> Self {
        FieldSpec {
            target: target.into(),
            transform,
        }
    }
}

/// Map one source row into target column values, in field order.
///
/// `row_key` identifies the row in skip reports. A `Skip` return means the
/// row is excluded deliberately; it is not an error.
pub fn map_row(
    row: &SourceRow,
    fields: &[FieldSpec],
    maps: &HashMap<String, ReferenceMap>,
    row_key: &str,
) -> Result<Vec<SqlValue>, Skip> {
    let mut values = Vec::with_capacity(fields.len());
    for field in fields {
        values.push(apply(&field.transform, row, maps, row_key, &field.target)?);
    }
    Ok(values)
}

fn apply(
    transform: &Transform,
    row: &SourceRow,
    maps: &HashMap<String, ReferenceMap>,
    row_key: &str,
    target: &str,
) -> Result<SqlValue, Skip> {
    match transform {
        Transform::Copy(source) => Ok(row.get(source).clone()),

        Transform::Trim(source) => Ok(trim_to_null(row.get(source))),

        Transform::TrimOr(source, default) => Ok(match trim_to_null(row.get(source)) {
            SqlValue::Null(_) => SqlValue::String(default.to_string()),
            other => other,
        }),

        Transform::Text(source) => {
            let value = row.get(source);
            if value.is_null() {
                return Ok(SqlValue::Null(SqlNullType::String));
            }
            let text = value.key_string();
            if text.is_empty() {
                Ok(SqlValue::Null(SqlNullType::String))
            } else {
                Ok(SqlValue::String(text))
            }
        }

        Transform::Bool(source) => Ok(SqlValue::Bool(row.get(source).is_truthy())),

        Transform::IsNull(source) => Ok(SqlValue::Bool(row.get(source).is_null())),

        Transform::Or(source, default) => {
            let value = row.get(source);
            if value.is_null() {
                Ok(default.clone())
            } else {
                Ok(value.clone())
            }
        }

        Transform::Const(value) => Ok(value.clone()),

        Transform::DateOnly(source) => Ok(match row.get(source) {
            SqlValue::DateTime(dt) => SqlValue::Date(dt.date()),
            SqlValue::DateTimeOffset(dt) => SqlValue::Date(dt.date_naive()),
            SqlValue::Date(d) => SqlValue::Date(*d),
            _ => SqlValue::Null(SqlNullType::Date),
        }),

        Transform::EnumMap {
            source,
            table,
            fallback,
        } => {
            let value = row.get(source);
            let code = value.key_string();
            if let Some((_, mapped)) = table.iter().find(|(k, _)| *k == code) {
                return Ok(SqlValue::String(mapped.to_string()));
            }
            match fallback {
                Some(f) => Ok(SqlValue::String(f.to_string())),
                None => Err(Skip {
                    reason: SkipReason::Mapping,
                    key: row_key.to_string(),
                    detail: format!("{}: no mapping for code '{}'", target, code),
                }),
            }
        }

        Transform::Lookup {
            sources,
            map,
            fallback,
        } => {
            let parts: Vec<&SqlValue> = sources.iter().map(|s| row.get(s)).collect();
            // An absent key is not a dangling one: NULL passes through.
            if parts.iter().all(|p| p.is_null()) {
                return Ok(SqlValue::Null(SqlNullType::I64));
            }
            let key = composite_key(&parts);
            let reference = maps.get(map.as_str());
            match reference.and_then(|m| m.lookup(&key)) {
                Some(value) => Ok(value.clone()),
                None => match fallback {
                    FkFallback::Sentinel(id) => Ok(SqlValue::I64(*id)),
                    FkFallback::Null => Ok(SqlValue::Null(SqlNullType::I64)),
                    FkFallback::Required => Err(Skip {
                        reason: SkipReason::FkUnresolved,
                        key: row_key.to_string(),
                        detail: format!("{}: '{}' not found in {}", target, key, map),
                    }),
                },
            }
        }

        Transform::Guard {
            source,
            equals,
            then,
        } => {
            if row.get(source).as_i64() == Some(*equals) {
                apply(then, row, maps, row_key, target)
            } else {
                Ok(SqlValue::Null(SqlNullType::I64))
            }
        }
    }
}

fn trim_to_null(value: &SqlValue) -> SqlValue {
    match value {
        SqlValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                SqlValue::Null(SqlNullType::String)
            } else {
                SqlValue::String(trimmed.to_string())
            }
        }
        SqlValue::Null(_) => SqlValue::Null(SqlNullType::String),
        other => other.clone(),
    }
}

/// Convenience: `Lookup` over a single source column.
pub fn lookup(source: &str, map: &str, fallback: FkFallback) -> Transform {
    Transform::Lookup {
        sources: vec![source.to_string()],
        map: map.to_string(),
        fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn row(columns: &[&str], values: Vec<SqlValue>) -> SourceRow {
        SourceRow::new(
            Arc::new(columns.iter().map(|c| c.to_string()).collect()),
            values,
        )
    }

    fn maps_with(name: &str, entries: &[(&str, SqlValue)]) -> HashMap<String, ReferenceMap> {
        let mut m = HashMap::new();
        m.insert(
            name.to_string(),
            ReferenceMap::from_entries(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ),
        );
        m
    }

    #[test]
    fn document_type_codes_fall_back_to_dni() {
        let fields = [FieldSpec::new(
            "tipo_documento",
            Transform::EnumMap {
                source: "tipodocto".into(),
                table: vec![("1", "DNI"), ("2", "LC"), ("3", "LE"), ("4", "PAS")],
                fallback: Some("DNI"),
            },
        )];
        let maps = HashMap::new();

        let mapped = map_row(&row(&["tipodocto"], vec![SqlValue::I16(3)]), &fields, &maps, "r").unwrap();
        assert_eq!(mapped[0], SqlValue::String("LE".into()));

        let mapped = map_row(&row(&["tipodocto"], vec![SqlValue::I16(9)]), &fields, &maps, "r").unwrap();
        assert_eq!(mapped[0], SqlValue::String("DNI".into()));

        let mapped = map_row(
            &row(&["tipodocto"], vec![SqlValue::Null(SqlNullType::I16)]),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert_eq!(mapped[0], SqlValue::String("DNI".into()));
    }

    #[test]
    fn trim_collapses_blank_to_null() {
        let fields = [FieldSpec::new("email", Transform::Trim("email".into()))];
        let maps = HashMap::new();

        let mapped = map_row(
            &row(&["email"], vec![SqlValue::String("  a@b.c  ".into())]),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert_eq!(mapped[0], SqlValue::String("a@b.c".into()));

        let mapped = map_row(
            &row(&["email"], vec![SqlValue::String("   ".into())]),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert!(mapped[0].is_null());
    }

    #[test]
    fn lookup_fallbacks() {
        let maps = maps_with("tarjetas", &[("5", SqlValue::I32(5))]);

        let sentinel = [FieldSpec::new(
            "tarjeta_id",
            lookup("Tarjeta", "tarjetas", FkFallback::Sentinel(0)),
        )];
        let mapped = map_row(&row(&["Tarjeta"], vec![SqlValue::I32(9)]), &sentinel, &maps, "r").unwrap();
        assert_eq!(mapped[0], SqlValue::I64(0));

        let nullable = [FieldSpec::new(
            "provincia_id",
            lookup("Tarjeta", "tarjetas", FkFallback::Null),
        )];
        let mapped = map_row(&row(&["Tarjeta"], vec![SqlValue::I32(9)]), &nullable, &maps, "r").unwrap();
        assert!(mapped[0].is_null());

        let required = [FieldSpec::new(
            "concepto_id",
            lookup("Tarjeta", "tarjetas", FkFallback::Required),
        )];
        let err = map_row(&row(&["Tarjeta"], vec![SqlValue::I32(9)]), &required, &maps, "r7")
            .unwrap_err();
        assert_eq!(err.reason, SkipReason::FkUnresolved);
        assert_eq!(err.key, "r7");

        let hit = map_row(&row(&["Tarjeta"], vec![SqlValue::I32(5)]), &required, &maps, "r").unwrap();
        assert_eq!(hit[0], SqlValue::I32(5));
    }

    #[test]
    fn guard_splits_on_discriminator() {
        let maps = maps_with("socios", &[("12", SqlValue::I32(12))]);
        let fields = [FieldSpec::new(
            "socio_id",
            Transform::Guard {
                source: "Entidad".into(),
                equals: 0,
                then: Box::new(lookup("Cliente", "socios", FkFallback::Required)),
            },
        )];

        // Discriminator matches and the member exists.
        let mapped = map_row(
            &row(&["Entidad", "Cliente"], vec![SqlValue::I16(0), SqlValue::I32(12)]),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert_eq!(mapped[0], SqlValue::I32(12));

        // Other discriminator value leaves the column NULL without a lookup.
        let mapped = map_row(
            &row(&["Entidad", "Cliente"], vec![SqlValue::I16(1), SqlValue::I32(99)]),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert!(mapped[0].is_null());

        // Discriminator matches but the member is unknown: skip the row.
        let err = map_row(
            &row(&["Entidad", "Cliente"], vec![SqlValue::I16(0), SqlValue::I32(99)]),
            &fields,
            &maps,
            "r",
        )
        .unwrap_err();
        assert_eq!(err.reason, SkipReason::FkUnresolved);
    }

    #[test]
    fn active_flag_from_termination_date() {
        let fields = [FieldSpec::new("activo", Transform::IsNull("fechabaja".into()))];
        let maps = HashMap::new();

        let active = map_row(
            &row(&["fechabaja"], vec![SqlValue::Null(SqlNullType::DateTime)]),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert_eq!(active[0], SqlValue::Bool(true));

        let inactive = map_row(
            &row(
                &["fechabaja"],
                vec![SqlValue::DateTime(
                    chrono::NaiveDate::from_ymd_opt(2020, 6, 1)
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap(),
                )],
            ),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert_eq!(inactive[0], SqlValue::Bool(false));
    }

    #[test]
    fn or_substitutes_default_for_null_only() {
        let fields = [FieldSpec::new(
            "importe",
            Transform::Or("importe".into(), SqlValue::I64(0)),
        )];
        let maps = HashMap::new();

        let mapped = map_row(
            &row(&["importe"], vec![SqlValue::Null(SqlNullType::Decimal)]),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert_eq!(mapped[0], SqlValue::I64(0));

        let mapped = map_row(
            &row(&["importe"], vec![SqlValue::Decimal(rust_decimal::Decimal::new(150, 2))]),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert_eq!(mapped[0], SqlValue::Decimal(rust_decimal::Decimal::new(150, 2)));
    }

    #[test]
    fn null_fk_passes_through_a_required_lookup() {
        let maps = maps_with("conceptos_tesoreria", &[("5", SqlValue::I32(5))]);
        let fields = [FieldSpec::new(
            "idconcepto_tesoreria",
            lookup("idConcepto_Tesoreria", "conceptos_tesoreria", FkFallback::Required),
        )];

        let mapped = map_row(
            &row(
                &["idConcepto_Tesoreria"],
                vec![SqlValue::Null(SqlNullType::I32)],
            ),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert!(mapped[0].is_null());
    }

    #[test]
    fn trim_or_fills_not_null_columns() {
        let fields = [FieldSpec::new("apellido", Transform::TrimOr("Apellido".into(), ""))];
        let maps = HashMap::new();

        let mapped = map_row(
            &row(&["Apellido"], vec![SqlValue::Null(SqlNullType::String)]),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert_eq!(mapped[0], SqlValue::String("".into()));
    }

    #[test]
    fn text_renders_numeric_document_numbers() {
        let fields = [FieldSpec::new("numero_documento", Transform::Text("numedocto".into()))];
        let maps = HashMap::new();

        let mapped = map_row(
            &row(&["numedocto"], vec![SqlValue::Decimal(rust_decimal::Decimal::from(20123456))]),
            &fields,
            &maps,
            "r",
        )
        .unwrap();
        assert_eq!(mapped[0], SqlValue::String("20123456".into()));
    }
}

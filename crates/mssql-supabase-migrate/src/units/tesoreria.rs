//! Treasury: movement concepts and the instruments ledger.
//!
//! Both tables upsert on id instead of wiping, so a re-run refreshes what it
//! finds and leaves rows created after the last migration untouched.

use crate::loader::LoadMode;
use crate::mapper::{lookup, FieldSpec, FkFallback, Transform};
use crate::resolver::ReferenceSpec;
use crate::units::{BatchSize, MigrationUnit};
use crate::value::SqlValue;

pub(super) fn units() -> Vec<MigrationUnit> {
    vec![conceptos_tesoreria(), valores_tesoreria()]
}

fn conceptos_tesoreria() -> MigrationUnit {
    MigrationUnit {
        name: "conceptos_tesoreria",
        source_query: "SELECT idConcepto_Tesoreria, Descripcion, Imputacion_Contable, \
                       Modalidad, CI, CE, Unificador, Mostrador, MonedaExtranjera \
                       FROM Conceptos_Tesoreria ORDER BY idConcepto_Tesoreria"
            .into(),
        target_table: "conceptos_tesoreria",
        key_columns: vec!["id"],
        source_key_columns: vec!["idConcepto_Tesoreria"],
        depends_on: vec![],
        mode: LoadMode::UpsertByKey,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("id", Transform::Copy("idConcepto_Tesoreria".into())),
            FieldSpec::new("descripcion", Transform::Copy("Descripcion".into())),
            FieldSpec::new("imputacion_contable", Transform::Copy("Imputacion_Contable".into())),
            FieldSpec::new("modalidad", Transform::Or("Modalidad".into(), SqlValue::I64(0))),
            FieldSpec::new("ci", Transform::Or("CI".into(), SqlValue::String("N".into()))),
            FieldSpec::new("ce", Transform::Or("CE".into(), SqlValue::String("N".into()))),
            FieldSpec::new("unificador", Transform::Copy("Unificador".into())),
            FieldSpec::new("mostrador", Transform::Or("Mostrador".into(), SqlValue::I64(0))),
            FieldSpec::new(
                "moneda_extranjera",
                Transform::Or("MonedaExtranjera".into(), SqlValue::I64(0)),
            ),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

fn valores_tesoreria() -> MigrationUnit {
    MigrationUnit {
        name: "valores_tesoreria",
        source_query: "SELECT idTransaccion, idTransaccionOrigen, TipoMovimiento, \
                       idConcepto_Tesoreria, FechaEmision, Vencimiento, Banco, Cuenta, \
                       Sucursal, Numero, NumeroInterno, Firma, importe, Cancelado, \
                       idOperador, Observaciones, locked, cobrador, Corregido, \
                       tipocambio, base FROM ValoresTesoreria ORDER BY idTransaccion"
            .into(),
        target_table: "valores_tesoreria",
        key_columns: vec!["id"],
        source_key_columns: vec!["idTransaccion"],
        depends_on: vec!["conceptos_tesoreria"],
        mode: LoadMode::UpsertByKey,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("id", Transform::Copy("idTransaccion".into())),
            FieldSpec::new("idtransaccion_origen", Transform::Copy("idTransaccionOrigen".into())),
            FieldSpec::new("tipo_movimiento", Transform::Copy("TipoMovimiento".into())),
            FieldSpec::new(
                "idconcepto_tesoreria",
                lookup("idConcepto_Tesoreria", "conceptos_tesoreria", FkFallback::Required),
            ),
            FieldSpec::new("fecha_emision", Transform::Copy("FechaEmision".into())),
            FieldSpec::new("vencimiento", Transform::Copy("Vencimiento".into())),
            FieldSpec::new("banco", Transform::Copy("Banco".into())),
            FieldSpec::new("cuenta", Transform::Copy("Cuenta".into())),
            FieldSpec::new("sucursal", Transform::Copy("Sucursal".into())),
            FieldSpec::new("numero", Transform::Copy("Numero".into())),
            FieldSpec::new("numero_interno", Transform::Copy("NumeroInterno".into())),
            FieldSpec::new("firma", Transform::Copy("Firma".into())),
            FieldSpec::new("importe", Transform::Or("importe".into(), SqlValue::I64(0))),
            FieldSpec::new("cancelado", Transform::Or("Cancelado".into(), SqlValue::I64(0))),
            FieldSpec::new("idoperador", Transform::Copy("idOperador".into())),
            FieldSpec::new("observaciones", Transform::Copy("Observaciones".into())),
            // locked arrives as a binary blob; any non-zero byte means held.
            FieldSpec::new("locked", Transform::Bool("locked".into())),
            FieldSpec::new("cobrador", Transform::Copy("cobrador".into())),
            FieldSpec::new("corregido", Transform::Copy("Corregido".into())),
            FieldSpec::new("tipocambio", Transform::Copy("tipocambio".into())),
            FieldSpec::new("base", Transform::Copy("base".into())),
        ],
        references: vec![ReferenceSpec::new(
            "conceptos_tesoreria",
            "conceptos_tesoreria",
            &["id"],
            "id",
        )],
        parent_filter: None,
        sequence_column: Some("id"),
    }
}

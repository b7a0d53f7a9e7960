//! Member/professional current accounts: transaction headers and line items.

use crate::loader::LoadMode;
use crate::mapper::{lookup, FieldSpec, FkFallback, Transform};
use crate::resolver::ReferenceSpec;
use crate::units::{BatchSize, MigrationUnit, ParentFilter};
use crate::value::SqlValue;

pub(super) fn units() -> Vec<MigrationUnit> {
    vec![headers(), detalle()]
}

fn headers() -> MigrationUnit {
    MigrationUnit {
        name: "cuentas_corrientes",
        // socio >= 10000 are internal accounts, Entidad outside 0/1 is
        // historical noise; both stay behind.
        source_query: "SELECT IdTransaccion, socio, Entidad, Fecha, \
                       RTRIM(LTRIM(Concepto)) as Concepto, PuntodeVenta, DocumentoNumero, \
                       FechaRendicion, Rendicion, importe, Cancelado, vencimiento \
                       FROM cuentascorrientes \
                       WHERE socio < 10000 AND Entidad IN (0, 1) ORDER BY IdTransaccion"
            .into(),
        target_table: "cuentas_corrientes",
        key_columns: vec!["idtransaccion"],
        source_key_columns: vec!["IdTransaccion"],
        depends_on: vec!["socios"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Detail,
        fields: vec![
            FieldSpec::new("idtransaccion", Transform::Copy("IdTransaccion".into())),
            // Entidad picks which entity the shared socio number refers to;
            // a number unknown on that side skips the transaction.
            FieldSpec::new(
                "socio_id",
                Transform::Guard {
                    source: "Entidad".into(),
                    equals: 0,
                    then: Box::new(lookup("socio", "socios", FkFallback::Required)),
                },
            ),
            FieldSpec::new(
                "profesional_id",
                Transform::Guard {
                    source: "Entidad".into(),
                    equals: 1,
                    then: Box::new(lookup("socio", "profesionales", FkFallback::Required)),
                },
            ),
            FieldSpec::new("entidad_id", Transform::Copy("Entidad".into())),
            FieldSpec::new("fecha", Transform::DateOnly("Fecha".into())),
            FieldSpec::new(
                "tipo_comprobante",
                lookup("Concepto", "tipos_comprobante", FkFallback::Null),
            ),
            FieldSpec::new("punto_venta", Transform::Text("PuntodeVenta".into())),
            FieldSpec::new("documento_numero", Transform::Text("DocumentoNumero".into())),
            FieldSpec::new("fecha_rendicion", Transform::DateOnly("FechaRendicion".into())),
            FieldSpec::new("rendicion", Transform::Text("Rendicion".into())),
            FieldSpec::new("importe", Transform::Or("importe".into(), SqlValue::I64(0))),
            FieldSpec::new("cancelado", Transform::Or("Cancelado".into(), SqlValue::I64(0))),
            FieldSpec::new("vencimiento", Transform::DateOnly("vencimiento".into())),
        ],
        references: vec![
            ReferenceSpec::new("socios", "socios", &["id"], "id"),
            ReferenceSpec::new("profesionales", "profesionales", &["id"], "id"),
            // Lookup keys are trimmed on both sides, so legacy codes match
            // canonical rows stored with a trailing space; the map value is
            // the exact stored spelling the foreign key wants.
            ReferenceSpec::new(
                "tipos_comprobante",
                "tipos_comprobante_socios",
                &["comprobante"],
                "comprobante",
            ),
        ],
        parent_filter: None,
        sequence_column: Some("idtransaccion"),
    }
}

fn detalle() -> MigrationUnit {
    MigrationUnit {
        name: "detalle_cuentas_corrientes",
        source_query: "SELECT idTransaccion, Item, Concepto, Cantidad, Importe \
                       FROM detallecuentascorrientes ORDER BY idTransaccion, Item"
            .into(),
        target_table: "detalle_cuentas_corrientes",
        key_columns: vec!["idtransaccion", "item"],
        source_key_columns: vec!["idTransaccion", "Item"],
        depends_on: vec!["cuentas_corrientes"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Detail,
        fields: vec![
            FieldSpec::new("idtransaccion", Transform::Copy("idTransaccion".into())),
            FieldSpec::new("item", Transform::Copy("Item".into())),
            FieldSpec::new("concepto", lookup("Concepto", "conceptos", FkFallback::Required)),
            FieldSpec::new("cantidad", Transform::Or("Cantidad".into(), SqlValue::I64(1))),
            FieldSpec::new("importe", Transform::Or("Importe".into(), SqlValue::I64(0))),
        ],
        references: vec![
            // The concept code lands in conceptos.codigo when that unit runs.
            ReferenceSpec::new("conceptos", "conceptos", &["codigo"], "codigo"),
            ReferenceSpec::new(
                "transacciones",
                "cuentas_corrientes",
                &["idtransaccion"],
                "idtransaccion",
            ),
        ],
        // Items whose header was skipped or filtered out have nothing to
        // hang off and are skipped too.
        parent_filter: Some(ParentFilter {
            map: "transacciones".into(),
            source_columns: vec!["idTransaccion".into()],
        }),
        sequence_column: None,
    }
}

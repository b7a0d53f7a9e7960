//! Journal entries: headers keyed by (asiento, aniomes, tipoasiento) and
//! their line items.

use crate::loader::LoadMode;
use crate::mapper::{lookup, FieldSpec, FkFallback, Transform};
use crate::resolver::ReferenceSpec;
use crate::units::{BatchSize, MigrationUnit, ParentFilter};
use crate::value::SqlValue;

pub(super) fn units() -> Vec<MigrationUnit> {
    vec![header(), items()]
}

fn header() -> MigrationUnit {
    MigrationUnit {
        name: "asientos_header",
        source_query: "SELECT asiento, aniomes, tipoasiento, fecha, detalle, centrocosto \
                       FROM AsientosDiariosHeader ORDER BY asiento, aniomes, tipoasiento"
            .into(),
        target_table: "asientos_header",
        key_columns: vec!["asiento", "anio_mes", "tipo_asiento"],
        source_key_columns: vec!["asiento", "aniomes", "tipoasiento"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Detail,
        fields: vec![
            FieldSpec::new("asiento", Transform::Copy("asiento".into())),
            FieldSpec::new("anio_mes", Transform::Copy("aniomes".into())),
            FieldSpec::new("tipo_asiento", Transform::Copy("tipoasiento".into())),
            FieldSpec::new("fecha", Transform::DateOnly("fecha".into())),
            FieldSpec::new("detalle", Transform::Trim("detalle".into())),
            FieldSpec::new("centro_costo", Transform::Copy("centrocosto".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

fn items() -> MigrationUnit {
    MigrationUnit {
        name: "asientos_items",
        source_query: "SELECT asiento, aniomes, tipoasiento, item, cuenta, debe, haber, \
                       observacion FROM AsientosDiariosItems \
                       ORDER BY asiento, aniomes, tipoasiento, item"
            .into(),
        target_table: "asientos_items",
        key_columns: vec!["asiento", "anio_mes", "tipo_asiento", "item"],
        source_key_columns: vec!["asiento", "aniomes", "tipoasiento", "item"],
        depends_on: vec!["asientos_header", "cuentas"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Detail,
        fields: vec![
            FieldSpec::new("asiento", Transform::Copy("asiento".into())),
            FieldSpec::new("anio_mes", Transform::Copy("aniomes".into())),
            FieldSpec::new("tipo_asiento", Transform::Copy("tipoasiento".into())),
            FieldSpec::new("item", Transform::Copy("item".into())),
            // An account missing from the migrated chart leaves the item
            // unlinked rather than lost.
            FieldSpec::new("cuenta_id", lookup("cuenta", "cuentas", FkFallback::Null)),
            FieldSpec::new("debe", Transform::Or("debe".into(), SqlValue::I64(0))),
            FieldSpec::new("haber", Transform::Or("haber".into(), SqlValue::I64(0))),
            FieldSpec::new("observacion", Transform::Trim("observacion".into())),
        ],
        references: vec![
            ReferenceSpec::new("cuentas", "cuentas", &["cuenta"], "cuenta"),
            ReferenceSpec::new(
                "asientos",
                "asientos_header",
                &["asiento", "anio_mes", "tipo_asiento"],
                "asiento",
            ),
        ],
        parent_filter: Some(ParentFilter {
            map: "asientos".into(),
            source_columns: vec!["asiento".into(), "aniomes".into(), "tipoasiento".into()],
        }),
        sequence_column: None,
    }
}

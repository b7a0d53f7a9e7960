//! Billing concepts, the member-concept join table and member notes.

use crate::loader::LoadMode;
use crate::mapper::{FieldSpec, Transform};
use crate::units::{BatchSize, MigrationUnit};
use crate::value::SqlValue;

pub(super) fn units() -> Vec<MigrationUnit> {
    vec![conceptos(), conceptos_socios(), observaciones_socios()]
}

fn conceptos() -> MigrationUnit {
    MigrationUnit {
        name: "conceptos",
        source_query: "SELECT Concepto, Entidad, Descripcion, Modalidad, Importe, mes, ano, \
                       Imputacion_Contable, Seguro, Grupo, Concepto_Muni, Modalidad_Muni, \
                       Importe_Muni, Cobertura, Comision, idCobertura FROM conceptos"
            .into(),
        target_table: "conceptos",
        key_columns: vec![],
        source_key_columns: vec!["Concepto", "Entidad"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("codigo", Transform::Trim("Concepto".into())),
            FieldSpec::new("entidad", Transform::Copy("Entidad".into())),
            FieldSpec::new("descripcion", Transform::Trim("Descripcion".into())),
            FieldSpec::new("modalidad", Transform::Trim("Modalidad".into())),
            FieldSpec::new("importe", Transform::Copy("Importe".into())),
            FieldSpec::new("mes", Transform::Copy("mes".into())),
            FieldSpec::new("ano", Transform::Copy("ano".into())),
            FieldSpec::new("imputacion_contable", Transform::Copy("Imputacion_Contable".into())),
            FieldSpec::new("seguro", Transform::Copy("Seguro".into())),
            FieldSpec::new("grupo", Transform::Trim("Grupo".into())),
            FieldSpec::new("concepto_muni", Transform::Trim("Concepto_Muni".into())),
            FieldSpec::new("modalidad_muni", Transform::Trim("Modalidad_Muni".into())),
            FieldSpec::new("importe_muni", Transform::Copy("Importe_Muni".into())),
            FieldSpec::new("cobertura", Transform::Copy("Cobertura".into())),
            FieldSpec::new("comision", Transform::Copy("Comision".into())),
            FieldSpec::new("id_cobertura", Transform::Copy("idCobertura".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

fn conceptos_socios() -> MigrationUnit {
    MigrationUnit {
        name: "conceptos_socios",
        source_query: "SELECT socio, Concepto, FechaAlta, FecHaVigencia, Importe, FechaBaja, \
                       MotivoBaja, Activo, Cuotas, Moneda, idCampoTarjeta, Rechazos, \
                       Presentadas, TipoCambio, ValorOrigen FROM conceptos_socios"
            .into(),
        target_table: "conceptos_socios",
        key_columns: vec![],
        source_key_columns: vec!["socio", "Concepto"],
        depends_on: vec!["conceptos", "socios"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("socio_id", Transform::Copy("socio".into())),
            FieldSpec::new("concepto_codigo", Transform::Trim("Concepto".into())),
            FieldSpec::new("fecha_alta", Transform::Copy("FechaAlta".into())),
            FieldSpec::new("fecha_vigencia", Transform::Copy("FecHaVigencia".into())),
            FieldSpec::new("importe", Transform::Copy("Importe".into())),
            FieldSpec::new("fecha_baja", Transform::Copy("FechaBaja".into())),
            FieldSpec::new("motivo_baja", Transform::Copy("MotivoBaja".into())),
            // The legacy Activo flag is stale; the termination date decides.
            FieldSpec::new("activo", Transform::IsNull("FechaBaja".into())),
            FieldSpec::new("cuotas", Transform::Copy("Cuotas".into())),
            FieldSpec::new("moneda", Transform::Copy("Moneda".into())),
            FieldSpec::new("id_campo_tarjeta", Transform::Copy("idCampoTarjeta".into())),
            FieldSpec::new("rechazos", Transform::Or("Rechazos".into(), SqlValue::I64(0))),
            FieldSpec::new("presentadas", Transform::Or("Presentadas".into(), SqlValue::I64(0))),
            FieldSpec::new("tipo_cambio", Transform::Copy("TipoCambio".into())),
            FieldSpec::new("valor_origen", Transform::Copy("ValorOrigen".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

fn observaciones_socios() -> MigrationUnit {
    MigrationUnit {
        name: "observaciones_socios",
        source_query: "SELECT Socio, fecha, observacion FROM observaciones_socios \
                       WHERE Socio IS NOT NULL ORDER BY fecha DESC"
            .into(),
        target_table: "observaciones_socios",
        key_columns: vec![],
        source_key_columns: vec!["Socio", "fecha"],
        depends_on: vec!["socios"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("socio_id", Transform::Copy("Socio".into())),
            FieldSpec::new(
                "fecha",
                Transform::Or(
                    "fecha".into(),
                    SqlValue::DateTime(chrono::Utc::now().naive_utc()),
                ),
            ),
            FieldSpec::new("observacion", Transform::TrimOr("observacion".into(), "")),
            FieldSpec::new("usuario", Transform::Const(SqlValue::String("Migración".into()))),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

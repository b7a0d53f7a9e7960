//! The member master table.

use crate::loader::LoadMode;
use crate::mapper::{lookup, FieldSpec, FkFallback, Transform};
use crate::resolver::ReferenceSpec;
use crate::units::{BatchSize, MigrationUnit};
use crate::value::SqlValue;

const QUERY: &str = "\
SELECT socio, Apellido, nombre, tipodocto, numedocto, cuil, Nacionalidad, Sexo, \
Nacido as fechanac, Grupo, gDesde, Residente, fresidencia, nroMatricula, Matricula, \
FechaIngreso, Domicilio, localidad, provincia, cpostal, pais, telefono, Fax, \
Email, EmailAlt1, Tarjeta, numero, Adherido, Vencimiento, DebitarDesde, FechaBaja \
FROM socios WHERE socio IS NOT NULL ORDER BY socio";

pub(super) fn unit() -> MigrationUnit {
    MigrationUnit {
        name: "socios",
        source_query: QUERY.into(),
        target_table: "socios",
        key_columns: vec!["id"],
        source_key_columns: vec!["socio"],
        depends_on: vec!["provincias", "paises", "tarjetas"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            // The member number is the identity everywhere else refers to.
            FieldSpec::new("id", Transform::Copy("socio".into())),
            FieldSpec::new("apellido", Transform::TrimOr("Apellido".into(), "")),
            FieldSpec::new("nombre", Transform::TrimOr("nombre".into(), "")),
            FieldSpec::new(
                "tipo_documento",
                Transform::EnumMap {
                    source: "tipodocto".into(),
                    table: vec![("1", "DNI"), ("2", "LC"), ("3", "LE"), ("4", "PAS")],
                    fallback: Some("DNI"),
                },
            ),
            FieldSpec::new("numero_documento", Transform::Text("numedocto".into())),
            FieldSpec::new("cuil", Transform::Trim("cuil".into())),
            FieldSpec::new("nacionalidad_id", Transform::Copy("Nacionalidad".into())),
            FieldSpec::new("sexo", Transform::Text("Sexo".into())),
            FieldSpec::new("fecha_nacimiento", Transform::Copy("fechanac".into())),
            FieldSpec::new("grupo", Transform::Trim("Grupo".into())),
            FieldSpec::new("grupo_desde", Transform::Copy("gDesde".into())),
            FieldSpec::new("residente", Transform::Bool("Residente".into())),
            FieldSpec::new("fecha_fin_residencia", Transform::Copy("fresidencia".into())),
            FieldSpec::new("matricula_nacional", Transform::Trim("nroMatricula".into())),
            FieldSpec::new("matricula_provincial", Transform::Trim("Matricula".into())),
            FieldSpec::new("fecha_ingreso", Transform::Copy("FechaIngreso".into())),
            FieldSpec::new("domicilio", Transform::Trim("Domicilio".into())),
            FieldSpec::new("localidad", Transform::Trim("localidad".into())),
            FieldSpec::new(
                "provincia_id",
                lookup("provincia", "provincias", FkFallback::Null),
            ),
            FieldSpec::new("codigo_postal", Transform::Trim("cpostal".into())),
            FieldSpec::new("pais_id", Transform::Copy("pais".into())),
            FieldSpec::new("telefono", Transform::Trim("telefono".into())),
            FieldSpec::new("telefono_secundario", Transform::Trim("Fax".into())),
            FieldSpec::new("email", Transform::Trim("Email".into())),
            FieldSpec::new("email_alternativo", Transform::Trim("EmailAlt1".into())),
            FieldSpec::new("tarjeta_id", Transform::Or("Tarjeta".into(), SqlValue::I64(0))),
            FieldSpec::new("numero_tarjeta", Transform::Trim("numero".into())),
            FieldSpec::new("adherido_debito", Transform::Bool("Adherido".into())),
            FieldSpec::new("vencimiento_tarjeta", Transform::Copy("Vencimiento".into())),
            FieldSpec::new("debitar_desde", Transform::Copy("DebitarDesde".into())),
            FieldSpec::new("activo", Transform::IsNull("FechaBaja".into())),
            FieldSpec::new("fecha_baja", Transform::Copy("FechaBaja".into())),
        ],
        references: vec![ReferenceSpec::new(
            "provincias",
            "provincias",
            &["codigo"],
            "id",
        )],
        parent_filter: None,
        sequence_column: Some("id"),
    }
}

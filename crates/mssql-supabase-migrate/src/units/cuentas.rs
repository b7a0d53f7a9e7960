//! Chart of accounts.

use crate::loader::LoadMode;
use crate::mapper::{FieldSpec, Transform};
use crate::units::{BatchSize, MigrationUnit};
use crate::value::SqlValue;

pub(super) fn unit() -> MigrationUnit {
    MigrationUnit {
        name: "cuentas",
        // The account number is the primary key downstream; rows without one
        // cannot exist in the target.
        source_query: "SELECT cuenta, descripcion, Resumida, sigla, tipocuentaContable, \
                       imputable, Rubro, subrubro FROM cuentas \
                       WHERE cuenta IS NOT NULL ORDER BY cuenta"
            .into(),
        target_table: "cuentas",
        key_columns: vec!["cuenta"],
        source_key_columns: vec!["cuenta"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("cuenta", Transform::Copy("cuenta".into())),
            FieldSpec::new("descripcion", Transform::TrimOr("descripcion".into(), "")),
            FieldSpec::new("descripcion_resumida", Transform::Trim("Resumida".into())),
            FieldSpec::new("sigla", Transform::Trim("sigla".into())),
            FieldSpec::new("tipo_cuenta_contable", Transform::Copy("tipocuentaContable".into())),
            FieldSpec::new("imputable", Transform::Bool("imputable".into())),
            FieldSpec::new("rubro", Transform::Copy("Rubro".into())),
            FieldSpec::new("subrubro", Transform::Copy("subrubro".into())),
            FieldSpec::new("activo", Transform::Const(SqlValue::Bool(true))),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

//! Reference tables: provincias, categorías IVA, grupos, países y tarjetas.

use crate::loader::LoadMode;
use crate::mapper::{FieldSpec, Transform};
use crate::units::{BatchSize, MigrationUnit};

pub(super) fn units() -> Vec<MigrationUnit> {
    vec![
        provincias(),
        categorias_iva(),
        grupos_agrupados(),
        paises(),
        tarjetas(),
    ]
}

fn provincias() -> MigrationUnit {
    MigrationUnit {
        name: "provincias",
        source_query: "SELECT provincia, Descripcion FROM Provincias".into(),
        target_table: "provincias",
        key_columns: vec!["codigo"],
        source_key_columns: vec!["provincia"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("codigo", Transform::Copy("provincia".into())),
            FieldSpec::new("descripcion", Transform::Trim("Descripcion".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

fn categorias_iva() -> MigrationUnit {
    MigrationUnit {
        name: "categorias_iva",
        source_query: "SELECT IdCiva, Descripcion, Ganancias, TipoFacturaCompras, \
                       TipoFacturaVentas, Resumido FROM Categorias_Iva"
            .into(),
        target_table: "categorias_iva",
        key_columns: vec!["codigo"],
        source_key_columns: vec!["IdCiva"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("codigo", Transform::Text("IdCiva".into())),
            FieldSpec::new("descripcion", Transform::Trim("Descripcion".into())),
            FieldSpec::new("ganancias", Transform::Copy("Ganancias".into())),
            FieldSpec::new("tipo_factura_compras", Transform::Trim("TipoFacturaCompras".into())),
            FieldSpec::new("tipo_factura_ventas", Transform::Trim("TipoFacturaVentas".into())),
            FieldSpec::new("resumido", Transform::Trim("Resumido".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

fn grupos_agrupados() -> MigrationUnit {
    MigrationUnit {
        name: "grupos_agrupados",
        source_query: "SELECT Grupo, Descripcion FROM Grupos_Agrupados".into(),
        target_table: "grupos_agrupados",
        key_columns: vec!["codigo"],
        source_key_columns: vec!["Grupo"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("codigo", Transform::Trim("Grupo".into())),
            FieldSpec::new("descripcion", Transform::Trim("Descripcion".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

fn paises() -> MigrationUnit {
    MigrationUnit {
        name: "paises",
        source_query: "SELECT idPais, Nombre FROM paises".into(),
        target_table: "paises",
        key_columns: vec!["id"],
        source_key_columns: vec!["idPais"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            // Legacy id preserved so socios.pais_id keeps pointing at it.
            FieldSpec::new("id", Transform::Copy("idPais".into())),
            FieldSpec::new("nombre", Transform::Trim("Nombre".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

fn tarjetas() -> MigrationUnit {
    MigrationUnit {
        name: "tarjetas",
        source_query: "SELECT IdTarjeta, Descripcion FROM Tarjetas ORDER BY IdTarjeta".into(),
        target_table: "tarjetas",
        key_columns: vec!["id"],
        source_key_columns: vec!["IdTarjeta"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            // Id 0 is the real "sin tarjeta" row and must survive as-is.
            FieldSpec::new("id", Transform::Copy("IdTarjeta".into())),
            FieldSpec::new("codigo", Transform::Copy("IdTarjeta".into())),
            FieldSpec::new("descripcion", Transform::Trim("Descripcion".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: Some("id"),
    }
}

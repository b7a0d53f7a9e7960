//! Declarative registry of everything the tool knows how to migrate.
//!
//! Each [`MigrationUnit`] is one source extract feeding one target table:
//! the query, the field mapping, the reference maps it resolves against and
//! how its batches are written. The orchestrator runs units in registry
//! order, which is dependency order.

mod asientos;
mod clipro;
mod conceptos;
mod cuentas;
mod cuentas_corrientes;
mod referencias;
mod socios;
mod tesoreria;

use crate::error::{MigrateError, Result};
use crate::loader::LoadMode;
use crate::mapper::FieldSpec;
use crate::resolver::ReferenceSpec;

/// Which configured batch size a unit loads with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSize {
    /// Wide rows, conservative batches (socios and friends).
    Standard,
    /// Narrow detail rows, larger batches.
    Detail,
}

/// Filter detail rows against the keys of an already-loaded parent table.
#[derive(Debug, Clone)]
pub struct ParentFilter {
    /// Reference map holding the parent keys.
    pub map: String,
    /// Source columns forming the parent key, in map key order.
    pub source_columns: Vec<String>,
}

/// One source extract feeding one target table.
#[derive(Debug, Clone)]
pub struct MigrationUnit {
    pub name: &'static str,
    pub source_query: String,
    pub target_table: &'static str,
    /// Target columns forming the logical key (dedupe and upsert conflict).
    /// Empty means rows have no logical key and are never deduplicated.
    pub key_columns: Vec<&'static str>,
    /// Source columns identifying a row in skip reports.
    pub source_key_columns: Vec<&'static str>,
    /// Units that must have succeeded earlier in the same run.
    pub depends_on: Vec<&'static str>,
    pub mode: LoadMode,
    pub batch: BatchSize,
    pub fields: Vec<FieldSpec>,
    pub references: Vec<ReferenceSpec>,
    pub parent_filter: Option<ParentFilter>,
    /// Identity column to reconcile after loading explicit ids.
    pub sequence_column: Option<&'static str>,
}

impl MigrationUnit {
    /// Target column names in insert order.
    pub fn target_columns(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.target.clone()).collect()
    }

    /// Indices of the key columns within the field list.
    pub fn key_indices(&self) -> Vec<usize> {
        self.key_columns
            .iter()
            .filter_map(|k| self.fields.iter().position(|f| f.target == *k))
            .collect()
    }
}

/// Every unit, in dependency order.
pub fn registry() -> Vec<MigrationUnit> {
    let mut units = referencias::units();
    units.push(socios::unit());
    units.extend(conceptos::units());
    units.push(cuentas::unit());
    units.extend(cuentas_corrientes::units());
    units.extend(asientos::units());
    units.extend(tesoreria::units());
    units.extend(clipro::units());
    units
}

/// Tables whose identity sequences the standalone reset utility covers,
/// paired with their id columns.
pub const SEQUENCE_TABLES: &[(&str, &str)] = &[
    ("valores_tesoreria", "id"),
    ("cuentas_corrientes", "idtransaccion"),
    ("detalle_cuentas_corrientes", "id"),
    ("socios", "id"),
    ("tarjetas", "id"),
    ("clientes", "codigo"),
    ("contactos_clientes", "id_contacto"),
    ("proveedores", "codigo"),
    ("contactos_proveedores", "id_contacto"),
    ("tip_vent_mod_header", "codigo"),
    ("tip_vent_mod_items", "id"),
    ("tip_comp_mod_header", "codigo"),
    ("tip_comp_mod_items", "id"),
    ("ven_cli_header", "id_transaccion"),
    ("ven_cli_items", "id_campo"),
    ("comp_prov_header", "id_transaccion"),
    ("comp_prov_items", "id_campo"),
];

/// Resolve a group or unit name into the ordered unit list to run.
pub fn select(name: &str) -> Result<Vec<MigrationUnit>> {
    let wanted: Vec<&str> = match name {
        "referencias" => vec![
            "provincias",
            "categorias_iva",
            "grupos_agrupados",
            "paises",
            "tarjetas",
        ],
        // A socios run refreshes tarjetas first, matching how the member
        // table has always been reloaded.
        "socios" => vec!["tarjetas", "socios"],
        "conceptos" => vec!["conceptos", "conceptos_socios", "observaciones_socios"],
        "cuentas" => vec!["cuentas"],
        "cuentas-corrientes" => vec!["cuentas_corrientes", "detalle_cuentas_corrientes"],
        "asientos" => vec!["asientos_header", "asientos_items"],
        "tesoreria" => vec!["conceptos_tesoreria", "valores_tesoreria"],
        "clipro" => vec![
            "clientes",
            "contactos_clientes",
            "proveedores",
            "contactos_proveedores",
            "tip_vent_mod_header",
            "tip_vent_mod_items",
            "tip_comp_mod_header",
            "tip_comp_mod_items",
            "ven_cli_header",
            "ven_cli_items",
            "comp_prov_header",
            "comp_prov_items",
        ],
        "all" => registry().iter().map(|u| u.name).collect(),
        single => vec![single],
    };

    let registry = registry();
    let mut selected = Vec::new();
    for name in wanted {
        match registry.iter().find(|u| u.name == name) {
            Some(unit) if !selected.iter().any(|u: &MigrationUnit| u.name == name) => {
                selected.push(unit.clone())
            }
            Some(_) => {}
            None => return Err(MigrateError::UnknownUnit(name.to_string())),
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_are_unique_and_deps_resolvable() {
        let units = registry();
        for (i, unit) in units.iter().enumerate() {
            assert!(
                units.iter().filter(|u| u.name == unit.name).count() == 1,
                "duplicate unit {}",
                unit.name
            );
            for dep in &unit.depends_on {
                let pos = units
                    .iter()
                    .position(|u| u.name == *dep)
                    .unwrap_or_else(|| panic!("{} depends on unknown {}", unit.name, dep));
                assert!(pos < i, "{} must come after its dependency {}", unit.name, dep);
            }
        }
    }

    #[test]
    fn key_columns_exist_in_field_lists() {
        for unit in registry() {
            assert_eq!(
                unit.key_indices().len(),
                unit.key_columns.len(),
                "unit {} has key columns missing from its fields",
                unit.name
            );
        }
    }

    #[test]
    fn reference_keys_are_written_by_their_producing_unit() {
        // A lookup against a table another unit loads must key on columns
        // that unit inserts; anything else resolves against nothing. Value
        // columns are exempt: serials like provincias.id exist without being
        // written.
        let units = registry();
        for unit in &units {
            for spec in &unit.references {
                let Some(producer) = units.iter().find(|u| u.target_table == spec.table) else {
                    continue;
                };
                let written = producer.target_columns();
                for key in &spec.key_columns {
                    assert!(
                        written.contains(key),
                        "{} looks up {}.{} but the {} unit writes {:?}",
                        unit.name,
                        spec.table,
                        key,
                        producer.name,
                        written
                    );
                }
            }
        }
    }

    #[test]
    fn groups_expand_in_order() {
        let socios = select("socios").unwrap();
        assert_eq!(
            socios.iter().map(|u| u.name).collect::<Vec<_>>(),
            vec!["tarjetas", "socios"]
        );

        let all = select("all").unwrap();
        assert_eq!(all.len(), registry().len());

        assert!(select("no-such-unit").is_err());
    }

    #[test]
    fn clipro_group_covers_both_sub_ledgers() {
        let clipro = select("clipro").unwrap();
        assert_eq!(clipro.len(), 12);
        let names: Vec<_> = clipro.iter().map(|u| u.name).collect();
        assert!(
            names.iter().position(|n| *n == "clientes").unwrap()
                < names.iter().position(|n| *n == "ven_cli_header").unwrap()
        );
        assert!(
            names.iter().position(|n| *n == "proveedores").unwrap()
                < names.iter().position(|n| *n == "comp_prov_header").unwrap()
        );

        // Item units hold back rows whose header was not loaded.
        for name in ["ven_cli_items", "comp_prov_items"] {
            let unit = clipro.iter().find(|u| u.name == name).unwrap();
            let filter = unit.parent_filter.as_ref().unwrap();
            assert_eq!(filter.map, "transacciones");
        }
    }

    #[test]
    fn single_unit_selection_works() {
        let one = select("cuentas_corrientes").unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].target_table, "cuentas_corrientes");
    }
}

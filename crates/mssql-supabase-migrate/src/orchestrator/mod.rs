//! Runs migration units in dependency order against live stores.
//!
//! Failure scoping: connectivity-class errors abort the run, everything else
//! is contained to the unit that produced it. Units whose dependency failed
//! are not attempted; independent units still run.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::MigrationConfig;
use crate::error::Result;
use crate::loader::{BatchLoader, MappedRow};
use crate::mapper::map_row;
use crate::report::{MigrationReport, Skip, SkipReason, UnitReport};
use crate::resolver::{composite_key, ReferenceResolver};
use crate::sequence::SequenceReconciler;
use crate::source::SourceStore;
use crate::target::TargetStore;
use crate::units::{BatchSize, MigrationUnit};

pub struct Orchestrator<'a> {
    source: &'a dyn SourceStore,
    target: &'a dyn TargetStore,
    config: &'a MigrationConfig,
    dry_run: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        source: &'a dyn SourceStore,
        target: &'a dyn TargetStore,
        config: &'a MigrationConfig,
        dry_run: bool,
    ) -> Self {
        Orchestrator {
            source,
            target,
            config,
            dry_run,
        }
    }

    /// Run the given units in order and aggregate their reports.
    ///
    /// Returns `Err` only for run-fatal errors; a unit that fails for its own
    /// reasons lands in the report with `fatal` set and the run continues.
    pub async fn run(&self, units: &[MigrationUnit]) -> Result<MigrationReport> {
        let started_at = Utc::now();
        let mut reports = Vec::with_capacity(units.len());
        let mut failed: HashSet<&str> = HashSet::new();

        for unit in units {
            if let Some(dep) = unit.depends_on.iter().find(|d| failed.contains(**d)) {
                warn!(unit = unit.name, dependency = dep, "skipping, dependency failed");
                let mut report = UnitReport::new(unit.name, unit.target_table);
                report.fatal = Some(format!("dependency {} failed earlier in the run", dep));
                failed.insert(unit.name);
                reports.push(report);
                continue;
            }

            info!(unit = unit.name, table = unit.target_table, "running unit");
            let report = self.run_unit(unit).await?;
            if !report.is_success() {
                failed.insert(unit.name);
            }
            reports.push(report);
        }

        Ok(MigrationReport {
            started_at,
            completed_at: Utc::now(),
            units: reports,
        })
    }

    async fn run_unit(&self, unit: &MigrationUnit) -> Result<UnitReport> {
        let mut report = UnitReport::new(unit.name, unit.target_table);
        report.dry_run = self.dry_run;

        let resolver = ReferenceResolver::new(self.target, self.config.reference_page_size);
        let maps = match resolver.load_all(&unit.references).await {
            Ok(maps) => maps,
            Err(e) if e.is_run_fatal() => return Err(e),
            Err(e) => {
                report.fatal = Some(e.to_string());
                return Ok(report);
            }
        };

        let rows = match self.source.read(&unit.source_query).await {
            Ok(rows) => rows,
            Err(e) if e.is_run_fatal() => return Err(e),
            Err(e) => {
                report.fatal = Some(e.to_string());
                return Ok(report);
            }
        };
        report.read = rows.len();

        let key_indices = unit.key_indices();
        let mut mapped = Vec::with_capacity(rows.len());
        for (ordinal, row) in rows.iter().enumerate() {
            let row_key = if unit.source_key_columns.is_empty() {
                ordinal.to_string()
            } else {
                unit.source_key_columns
                    .iter()
                    .map(|c| row.get(c).key_string())
                    .collect::<Vec<_>>()
                    .join("/")
            };

            if let Some(filter) = &unit.parent_filter {
                let parts: Vec<_> = filter.source_columns.iter().map(|c| row.get(c)).collect();
                let parent_key = composite_key(&parts);
                let loaded = maps
                    .get(&filter.map)
                    .map(|m| m.contains(&parent_key))
                    .unwrap_or(false);
                if !loaded {
                    report.skipped.push(Skip {
                        reason: SkipReason::FkUnresolved,
                        key: row_key,
                        detail: format!("parent '{}' not present in {}", parent_key, filter.map),
                    });
                    continue;
                }
            }

            match map_row(row, &unit.fields, &maps, &row_key) {
                Ok(values) => {
                    let key = if key_indices.is_empty() {
                        ordinal.to_string()
                    } else {
                        let parts: Vec<_> = key_indices.iter().map(|&i| &values[i]).collect();
                        composite_key(&parts)
                    };
                    mapped.push(MappedRow { key, values });
                }
                Err(skip) => report.skipped.push(skip),
            }
        }

        let batch_size = match unit.batch {
            BatchSize::Standard => self.config.batch_size,
            BatchSize::Detail => self.config.detail_batch_size,
        };
        let columns = unit.target_columns();
        let key_columns: Vec<String> = unit.key_columns.iter().map(|k| k.to_string()).collect();

        let loader = BatchLoader::new(self.target, self.dry_run);
        if let Err(e) = loader
            .load(
                unit.target_table,
                &columns,
                &key_columns,
                mapped,
                batch_size,
                unit.mode,
                &mut report,
            )
            .await
        {
            if e.is_run_fatal() {
                return Err(e);
            }
            report.fatal = Some(e.to_string());
            return Ok(report);
        }

        if let Some(column) = unit.sequence_column {
            if !self.dry_run && report.fatal.is_none() {
                match SequenceReconciler::new(self.target)
                    .reconcile(unit.target_table, column)
                    .await
                {
                    Ok(outcome) => report.sequence = Some(outcome),
                    Err(e) if e.is_run_fatal() => return Err(e),
                    Err(e) => report.fatal = Some(e.to_string()),
                }
            }
        }

        Ok(report)
    }
}

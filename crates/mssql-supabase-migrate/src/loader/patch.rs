//! One-off utility that back-fills a single column on an already migrated
//! table, re-reading the value from the source database.

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::resolver::{ReferenceResolver, ReferenceSpec};
use crate::source::SourceStore;
use crate::target::TargetStore;
use crate::value::{SqlNullType, SqlValue};

/// What to patch and how.
#[derive(Debug, Clone)]
pub struct PatchOptions {
    /// Source table and the key/value columns to read.
    pub source_table: String,
    pub source_key_column: String,
    pub source_column: String,
    /// Target table and the key/value columns to write.
    pub target_table: String,
    pub target_key_column: String,
    pub target_column: String,
    /// Report what would change without updating anything.
    pub dry_run: bool,
    /// Touch only rows whose target column is currently NULL.
    pub only_missing: bool,
    /// Rows updated concurrently per wave.
    pub concurrency: usize,
    /// Page size for reading current target values.
    pub reference_page_size: usize,
}

/// Outcome of a patch run.
#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    pub read: usize,
    pub updated: usize,
    pub skipped_empty_source: usize,
    pub skipped_already_set: usize,
    pub errored: usize,
    pub dry_run: bool,
}

/// Copy one column from source to target, keyed by the shared row id.
///
/// Updates run in waves of `concurrency` concurrent statements; this is the
/// one place the tool issues concurrent writes, each statement touching a
/// different row by primary key.
pub async fn patch_column(
    source: &dyn SourceStore,
    target: &dyn TargetStore,
    opts: &PatchOptions,
) -> Result<PatchReport> {
    let query = format!(
        "SELECT {key}, {col} FROM {table} ORDER BY {key}",
        key = opts.source_key_column,
        col = opts.source_column,
        table = opts.source_table,
    );
    let rows = source.read(&query).await?;

    // Snapshot of current target values, used to honor --only-missing.
    let current = if opts.only_missing {
        let resolver = ReferenceResolver::new(target, opts.reference_page_size);
        let spec = ReferenceSpec::new(
            "current",
            &opts.target_table,
            &[opts.target_key_column.as_str()],
            &opts.target_column,
        );
        Some(resolver.load(&spec).await?)
    } else {
        None
    };

    let mut report = PatchReport {
        read: rows.len(),
        updated: 0,
        skipped_empty_source: 0,
        skipped_already_set: 0,
        errored: 0,
        dry_run: opts.dry_run,
    };

    let mut pending: Vec<(SqlValue, SqlValue)> = Vec::new();
    for row in &rows {
        let key = row.get(&opts.source_key_column).clone();
        let value = match row.get(&opts.source_column) {
            SqlValue::String(s) if s.trim().is_empty() => SqlValue::Null(SqlNullType::String),
            SqlValue::String(s) => SqlValue::String(s.trim().to_string()),
            other => other.clone(),
        };

        if value.is_null() {
            report.skipped_empty_source += 1;
            continue;
        }
        if let Some(map) = &current {
            if map.lookup(&key.key_string()).map(|v| !v.is_null()).unwrap_or(false) {
                report.skipped_already_set += 1;
                continue;
            }
        }
        pending.push((key, value));
    }

    if opts.dry_run {
        info!(
            table = %opts.target_table,
            column = %opts.target_column,
            would_update = pending.len(),
            "dry run: no updates issued"
        );
        return Ok(report);
    }

    for wave in pending.chunks(opts.concurrency) {
        let updates = wave.iter().map(|(key, value)| {
            target.update_value(
                &opts.target_table,
                &opts.target_key_column,
                key,
                &opts.target_column,
                value,
            )
        });
        for (result, (key, _)) in join_all(updates).await.into_iter().zip(wave) {
            match result {
                Ok(affected) if affected > 0 => report.updated += 1,
                Ok(_) => {
                    warn!(key = %key.key_string(), "no target row for key, nothing updated");
                }
                Err(e) if e.is_run_fatal() => return Err(e),
                Err(e) => {
                    warn!(key = %key.key_string(), error = %e, "update failed");
                    report.errored += 1;
                }
            }
        }
    }

    info!(
        table = %opts.target_table,
        column = %opts.target_column,
        updated = report.updated,
        skipped_empty = report.skipped_empty_source,
        skipped_set = report.skipped_already_set,
        errored = report.errored,
        "patch complete"
    );
    Ok(report)
}

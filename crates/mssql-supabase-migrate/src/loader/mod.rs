//! Chunked loading of mapped rows into the target database.

mod patch;

pub use patch::{patch_column, PatchOptions, PatchReport};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::report::{Skip, SkipReason, UnitReport};
use crate::target::TargetStore;
use crate::value::SqlValue;

/// How a unit's rows reach the target table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Wipe the table, then insert everything. Re-runnable full reload.
    DeleteThenInsert,
    /// INSERT ... ON CONFLICT on the logical key. Existing rows are updated
    /// in place, unrelated rows survive.
    UpsertByKey,
}

/// One mapped row plus the logical key it is deduplicated on.
#[derive(Debug, Clone)]
pub struct MappedRow {
    pub key: String,
    pub values: Vec<SqlValue>,
}

/// Drop earlier occurrences of a repeated logical key.
///
/// Output keeps the position of each key's first occurrence but carries the
/// values of its last occurrence, matching what a keyed upsert of the same
/// stream would leave behind.
pub fn dedupe_last_wins(rows: Vec<MappedRow>) -> (Vec<MappedRow>, Vec<Skip>) {
    use std::collections::HashMap;

    let mut index: HashMap<String, usize> = HashMap::with_capacity(rows.len());
    let mut out: Vec<Option<MappedRow>> = Vec::with_capacity(rows.len());
    let mut skips = Vec::new();

    for row in rows {
        match index.get(&row.key) {
            Some(&slot) => {
                skips.push(Skip {
                    reason: SkipReason::DuplicateInBatch,
                    key: row.key.clone(),
                    detail: "earlier row with the same key replaced".into(),
                });
                out[slot] = Some(row);
            }
            None => {
                index.insert(row.key.clone(), out.len());
                out.push(Some(row));
            }
        }
    }

    (out.into_iter().flatten().collect(), skips)
}

/// Writes mapped rows in fixed-size chunks with per-chunk failure isolation.
pub struct BatchLoader<'a> {
    target: &'a dyn TargetStore,
    dry_run: bool,
}

impl<'a> BatchLoader<'a> {
    pub fn new(target: &'a dyn TargetStore, dry_run: bool) -> Self {
        BatchLoader { target, dry_run }
    }

    /// Load rows into `table`, recording progress into `report`.
    ///
    /// A failed chunk loses only its own rows: the error lands in the report
    /// and the next chunk proceeds. Duplicate keys within the extract are
    /// collapsed last-wins before anything is written.
    pub async fn load(
        &self,
        table: &str,
        columns: &[String],
        key_columns: &[String],
        rows: Vec<MappedRow>,
        batch_size: usize,
        mode: LoadMode,
        report: &mut UnitReport,
    ) -> Result<()> {
        let (rows, dup_skips) = dedupe_last_wins(rows);
        report.skipped.extend(dup_skips);
        report.dry_run = self.dry_run;

        if self.dry_run {
            info!(
                table,
                rows = rows.len(),
                "dry run: rows mapped and deduplicated, nothing written"
            );
            return Ok(());
        }

        if mode == LoadMode::DeleteThenInsert {
            self.target.delete_all(table).await?;
            debug!(table, "cleared target table");
        }

        let total = rows.len();
        for chunk in rows.chunks(batch_size) {
            let values: Vec<Vec<SqlValue>> = chunk.iter().map(|r| r.values.clone()).collect();
            let result = match mode {
                LoadMode::DeleteThenInsert => {
                    self.target.insert_chunk(table, columns, &values).await
                }
                LoadMode::UpsertByKey => {
                    self.target
                        .upsert_chunk(table, columns, key_columns, &values)
                        .await
                }
            };

            match result {
                Ok(written) => {
                    report.inserted += written as usize;
                    debug!(table, progress = report.inserted, total, "chunk loaded");
                }
                Err(e) if e.is_run_fatal() => return Err(e),
                Err(e) => {
                    warn!(table, error = %e, lost = chunk.len(), "chunk failed, continuing");
                    let message = e.to_string();
                    report.errored += chunk.len();
                    // Each lost row stays identifiable for reconciliation.
                    for row in chunk {
                        report.skipped.push(Skip {
                            reason: SkipReason::InsertError,
                            key: row.key.clone(),
                            detail: message.clone(),
                        });
                    }
                    report.chunk_errors.push(message);
                }
            }
        }

        info!(
            table,
            inserted = report.inserted,
            skipped = report.skipped.len(),
            errored = report.errored,
            "load complete"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTarget;

    fn mapped(key: &str, id: i32) -> MappedRow {
        MappedRow {
            key: key.to_string(),
            values: vec![SqlValue::I32(id)],
        }
    }

    #[test]
    fn dedupe_keeps_last_value_first_position() {
        let (rows, skips) = dedupe_last_wins(vec![
            mapped("a", 1),
            mapped("b", 2),
            mapped("a", 3),
            mapped("c", 4),
        ]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].key, "a");
        assert_eq!(rows[0].values, vec![SqlValue::I32(3)]);
        assert_eq!(rows[1].key, "b");
        assert_eq!(rows[2].key, "c");
        assert_eq!(skips.len(), 1);
        assert_eq!(skips[0].reason, SkipReason::DuplicateInBatch);
        assert_eq!(skips[0].key, "a");
    }

    #[tokio::test]
    async fn failed_chunk_loses_only_its_own_rows() {
        let target = MockTarget::new();
        target.fail_insert_chunk("t", 1); // second chunk errors

        let rows: Vec<MappedRow> = (0..10).map(|i| mapped(&i.to_string(), i)).collect();
        let columns = vec!["id".to_string()];
        let mut report = UnitReport::new("t", "t");

        let loader = BatchLoader::new(&target, false);
        loader
            .load(
                "t",
                &columns,
                &[],
                rows,
                4,
                LoadMode::DeleteThenInsert,
                &mut report,
            )
            .await
            .unwrap();

        // Chunks of 4/4/2; the middle chunk of 4 is lost.
        assert_eq!(report.inserted, 6);
        assert_eq!(report.errored, 4);
        assert_eq!(report.chunk_errors.len(), 1);
        assert!(report.is_success() == false);
        assert_eq!(target.deleted("t"), 1);

        // Every lost row is reported individually with its key.
        let lost: Vec<&Skip> = report
            .skipped
            .iter()
            .filter(|s| s.reason == SkipReason::InsertError)
            .collect();
        assert_eq!(
            lost.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
            vec!["4", "5", "6", "7"]
        );
        assert!(lost[0].detail.contains("scripted chunk failure"));
    }

    #[tokio::test]
    async fn delete_then_insert_clears_table_once() {
        let target = MockTarget::new();
        let rows: Vec<MappedRow> = (0..5).map(|i| mapped(&i.to_string(), i)).collect();
        let columns = vec!["id".to_string()];
        let mut report = UnitReport::new("t", "t");

        let loader = BatchLoader::new(&target, false);
        loader
            .load("t", &columns, &[], rows, 2, LoadMode::DeleteThenInsert, &mut report)
            .await
            .unwrap();

        assert_eq!(target.deleted("t"), 1);
        assert_eq!(report.inserted, 5);
        assert_eq!(target.inserted_rows("t").len(), 5);
    }

    #[tokio::test]
    async fn upsert_mode_does_not_delete() {
        let target = MockTarget::new();
        let rows = vec![mapped("1", 1), mapped("2", 2)];
        let columns = vec!["id".to_string()];
        let keys = vec!["id".to_string()];
        let mut report = UnitReport::new("t", "t");

        let loader = BatchLoader::new(&target, false);
        loader
            .load("t", &columns, &keys, rows, 100, LoadMode::UpsertByKey, &mut report)
            .await
            .unwrap();

        assert_eq!(target.deleted("t"), 0);
        assert_eq!(target.upserted_rows("t").len(), 2);
    }

    #[tokio::test]
    async fn rerunning_a_load_converges_in_both_modes() {
        let target = MockTarget::new();
        let columns = vec!["id".to_string()];
        let loader = BatchLoader::new(&target, false);

        // delete-then-insert: the second pass wipes and reloads.
        for _ in 0..2 {
            let rows: Vec<MappedRow> = (0..5).map(|i| mapped(&i.to_string(), i)).collect();
            let mut report = UnitReport::new("t", "t");
            loader
                .load("t", &columns, &[], rows, 2, LoadMode::DeleteThenInsert, &mut report)
                .await
                .unwrap();
            assert_eq!(report.inserted, 5);
        }
        assert_eq!(target.deleted("t"), 2);
        assert_eq!(target.inserted_rows("t").len(), 5);

        // upsert-by-key: the second pass updates in place.
        let columns = vec!["id".to_string(), "importe".to_string()];
        let keys = vec!["id".to_string()];
        for pass in 0..2 {
            let rows = vec![
                MappedRow {
                    key: "1".into(),
                    values: vec![SqlValue::I32(1), SqlValue::I64(10 + pass)],
                },
                MappedRow {
                    key: "2".into(),
                    values: vec![SqlValue::I32(2), SqlValue::I64(20 + pass)],
                },
            ];
            let mut report = UnitReport::new("u", "u");
            loader
                .load("u", &columns, &keys, rows, 100, LoadMode::UpsertByKey, &mut report)
                .await
                .unwrap();
        }
        let rows = target.upserted_rows("u");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![SqlValue::I32(1), SqlValue::I64(11)]);
    }

    #[tokio::test]
    async fn dry_run_writes_nothing() {
        let target = MockTarget::new();
        let rows = vec![mapped("1", 1), mapped("1", 2)];
        let columns = vec!["id".to_string()];
        let mut report = UnitReport::new("t", "t");

        let loader = BatchLoader::new(&target, true);
        loader
            .load("t", &columns, &[], rows, 100, LoadMode::DeleteThenInsert, &mut report)
            .await
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.inserted, 0);
        assert_eq!(report.skipped.len(), 1); // dedupe still reported
        assert_eq!(target.deleted("t"), 0);
        assert!(target.inserted_rows("t").is_empty());
    }
}

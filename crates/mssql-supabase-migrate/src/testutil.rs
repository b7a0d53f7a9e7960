//! In-memory store doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{MigrateError, Result};
use crate::row::SourceRow;
use crate::source::SourceStore;
use crate::target::TargetStore;
use crate::value::SqlValue;

/// Scripted source: queries must be seeded before they are read.
#[derive(Default)]
pub struct MockSource {
    state: Mutex<MockSourceState>,
}

#[derive(Default)]
struct MockSourceState {
    results: HashMap<String, Vec<SourceRow>>,
    failures: HashMap<String, (String, bool)>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, query: &str, columns: Vec<String>, rows: Vec<Vec<SqlValue>>) {
        let header = Arc::new(columns);
        let rows = rows
            .into_iter()
            .map(|values| SourceRow::new(header.clone(), values))
            .collect();
        self.state
            .lock()
            .unwrap()
            .results
            .insert(query.to_string(), rows);
    }

    /// Make a query fail; `run_fatal` selects a connectivity-class error.
    pub fn fail_read(&self, query: &str, message: &str, run_fatal: bool) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(query.to_string(), (message.to_string(), run_fatal));
    }
}

#[async_trait]
impl SourceStore for MockSource {
    async fn read(&self, query: &str) -> Result<Vec<SourceRow>> {
        let state = self.state.lock().unwrap();
        if let Some((message, run_fatal)) = state.failures.get(query) {
            return Err(if *run_fatal {
                MigrateError::pool(message.clone(), "mock source")
            } else {
                MigrateError::query(query, message.clone())
            });
        }
        match state.results.get(query) {
            Some(rows) => Ok(rows.clone()),
            None => panic!("unseeded query: {query}"),
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Recording target with seedable reference tables and scriptable failures.
#[derive(Default)]
pub struct MockTarget {
    state: Mutex<MockTargetState>,
}

#[derive(Default)]
struct MockTargetState {
    references: HashMap<String, Vec<(Vec<SqlValue>, SqlValue)>>,
    reference_fetches: HashMap<String, usize>,
    failed_references: HashMap<String, String>,
    inserted: HashMap<String, Vec<Vec<SqlValue>>>,
    upserted: HashMap<String, Vec<Vec<SqlValue>>>,
    updates: HashMap<String, Vec<(String, SqlValue, SqlValue)>>,
    deletes: HashMap<String, usize>,
    failed_delete: HashMap<String, String>,
    insert_failures: HashMap<String, Vec<usize>>,
    insert_calls: HashMap<String, usize>,
    zero_affected: HashMap<String, bool>,
    denied_sequences: HashMap<String, bool>,
    sequences: HashMap<String, i64>,
}

impl MockTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_reference(&self, table: &str, rows: Vec<(Vec<SqlValue>, SqlValue)>) {
        self.state
            .lock()
            .unwrap()
            .references
            .insert(table.to_string(), rows);
    }

    pub fn fail_reference(&self, table: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failed_references
            .insert(table.to_string(), message.to_string());
    }

    pub fn fail_delete_all(&self, table: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failed_delete
            .insert(table.to_string(), message.to_string());
    }

    /// Fail the nth (0-based) insert_chunk call against a table.
    pub fn fail_insert_chunk(&self, table: &str, nth: usize) {
        self.state
            .lock()
            .unwrap()
            .insert_failures
            .entry(table.to_string())
            .or_default()
            .push(nth);
    }

    pub fn report_zero_affected(&self, table: &str) {
        self.state
            .lock()
            .unwrap()
            .zero_affected
            .insert(table.to_string(), true);
    }

    pub fn deny_set_sequence(&self, table: &str) {
        self.state
            .lock()
            .unwrap()
            .denied_sequences
            .insert(table.to_string(), true);
    }

    pub fn reference_fetches(&self, table: &str) -> usize {
        *self
            .state
            .lock()
            .unwrap()
            .reference_fetches
            .get(table)
            .unwrap_or(&0)
    }

    pub fn deleted(&self, table: &str) -> usize {
        *self.state.lock().unwrap().deletes.get(table).unwrap_or(&0)
    }

    pub fn inserted_rows(&self, table: &str) -> Vec<Vec<SqlValue>> {
        self.state
            .lock()
            .unwrap()
            .inserted
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn upserted_rows(&self, table: &str) -> Vec<Vec<SqlValue>> {
        self.state
            .lock()
            .unwrap()
            .upserted
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn updates(&self, table: &str) -> Vec<(String, SqlValue, SqlValue)> {
        self.state
            .lock()
            .unwrap()
            .updates
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn sequence(&self, table: &str) -> Option<i64> {
        self.state.lock().unwrap().sequences.get(table).copied()
    }
}

#[async_trait]
impl TargetStore for MockTarget {
    async fn delete_all(&self, table: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.failed_delete.get(table) {
            return Err(MigrateError::load(table, message.clone()));
        }
        *state.deletes.entry(table.to_string()).or_insert(0) += 1;
        state.inserted.remove(table);
        Ok(())
    }

    async fn insert_chunk(
        &self,
        table: &str,
        _cols: &[String],
        rows: &[Vec<SqlValue>],
    ) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        let call = *state.insert_calls.get(table).unwrap_or(&0);
        *state.insert_calls.entry(table.to_string()).or_insert(0) += 1;
        if state
            .insert_failures
            .get(table)
            .map(|f| f.contains(&call))
            .unwrap_or(false)
        {
            return Err(MigrateError::load(table, "scripted chunk failure"));
        }
        state
            .inserted
            .entry(table.to_string())
            .or_default()
            .extend(rows.iter().cloned());
        Ok(rows.len() as u64)
    }

    async fn upsert_chunk(
        &self,
        table: &str,
        cols: &[String],
        key_cols: &[String],
        rows: &[Vec<SqlValue>],
    ) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        let entries = state.upserted.entry(table.to_string()).or_default();
        // Conflict semantics: a row matching on the key columns is replaced.
        let key_idx: Vec<usize> = key_cols
            .iter()
            .filter_map(|k| cols.iter().position(|c| c == k))
            .collect();
        for row in rows {
            let existing = if key_idx.is_empty() {
                None
            } else {
                entries
                    .iter_mut()
                    .find(|e| key_idx.iter().all(|&i| e[i] == row[i]))
            };
            match existing {
                Some(e) => *e = row.clone(),
                None => entries.push(row.clone()),
            }
        }
        Ok(rows.len() as u64)
    }

    async fn update_value(
        &self,
        table: &str,
        key_col: &str,
        key: &SqlValue,
        _col: &str,
        value: &SqlValue,
    ) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        if state.zero_affected.get(table).copied().unwrap_or(false) {
            return Ok(0);
        }
        state
            .updates
            .entry(table.to_string())
            .or_default()
            .push((key_col.to_string(), key.clone(), value.clone()));
        Ok(1)
    }

    async fn fetch_reference_page(
        &self,
        table: &str,
        _key_cols: &[String],
        _value_col: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<(Vec<SqlValue>, SqlValue)>> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.failed_references.get(table) {
            return Err(MigrateError::resolve(table, message.clone()));
        }
        *state
            .reference_fetches
            .entry(table.to_string())
            .or_insert(0) += 1;
        let rows = state
            .references
            .get(table)
            .cloned()
            .unwrap_or_default();
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn max_value(&self, table: &str, _col: &str) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .references
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter_map(|(_, v)| v.as_i64())
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0))
    }

    async fn set_sequence(&self, table: &str, col: &str, next: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.denied_sequences.get(table).copied().unwrap_or(false) {
            return Err(MigrateError::Sequence {
                table: table.to_string(),
                column: col.to_string(),
                message: "permission denied for sequence".to_string(),
            });
        }
        state.sequences.insert(table.to_string(), next);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

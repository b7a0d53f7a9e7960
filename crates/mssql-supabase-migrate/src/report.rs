//! Per-unit and per-run result reporting.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a source row was left out of the target table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A required foreign key had no entry in the reference map.
    FkUnresolved,
    /// A later row in the same extract carries the same logical key.
    DuplicateInBatch,
    /// The row failed a mapping guard (bad discriminator, missing parent).
    Mapping,
    /// The row was in a chunk whose bulk write failed.
    InsertError,
}

/// One skipped row, identified by its source-side key.
#[derive(Debug, Clone, Serialize)]
pub struct Skip {
    pub reason: SkipReason,
    pub key: String,
    pub detail: String,
}

/// Outcome of reconciling one identity sequence.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SequenceOutcome {
    /// setval ran against the live database.
    Applied { next_value: i64 },
    /// The role lacked privileges; the statement is reported for a DBA to run.
    Reported { statement: String },
}

/// Result of one migration unit.
#[derive(Debug, Clone, Serialize)]
pub struct UnitReport {
    pub unit: String,
    pub table: String,
    /// Rows read from the source extract.
    pub read: usize,
    /// Rows written to the target.
    pub inserted: usize,
    /// Rows deliberately left out, with reasons.
    pub skipped: Vec<Skip>,
    /// Rows lost to chunk-level insert failures.
    pub errored: usize,
    /// Insert errors, one message per failed chunk.
    pub chunk_errors: Vec<String>,
    /// Set when the unit aborted before or during loading.
    pub fatal: Option<String>,
    pub sequence: Option<SequenceOutcome>,
    pub dry_run: bool,
}

impl UnitReport {
    pub fn new(unit: impl Into<String>, table: impl Into<String>) -> Self {
        UnitReport {
            unit: unit.into(),
            table: table.into(),
            read: 0,
            inserted: 0,
            skipped: Vec::new(),
            errored: 0,
            chunk_errors: Vec::new(),
            fatal: None,
            sequence: None,
            dry_run: false,
        }
    }

    /// A unit succeeded when it ran to completion and lost no rows to errors.
    /// Skips are not failures; they are accounted-for exclusions.
    pub fn is_success(&self) -> bool {
        self.fatal.is_none() && self.errored == 0
    }
}

/// Aggregated result of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub units: Vec<UnitReport>,
}

impl MigrationReport {
    pub fn is_success(&self) -> bool {
        self.units.iter().all(UnitReport::is_success)
    }

    pub fn duration_secs(&self) -> f64 {
        (self.completed_at - self.started_at)
            .num_milliseconds()
            .max(0) as f64
            / 1000.0
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

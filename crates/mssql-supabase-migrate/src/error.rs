//! Error types for the migration library.

use thiserror::Error;

/// Main error type for migration operations.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Configuration error (invalid YAML, missing env vars, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source database connection or query error
    #[error("Source database error: {0}")]
    Source(#[from] tiberius::error::Error),

    /// Target database connection or query error
    #[error("Target database error: {0}")]
    Target(#[from] tokio_postgres::Error),

    /// Connection pool error with context
    #[error("Pool error: {message}\n  Context: {context}")]
    Pool { message: String, context: String },

    /// A reference table could not be loaded into memory
    #[error("Reference resolution failed for {table}: {message}")]
    Resolve { table: String, message: String },

    /// A source query failed; fatal to the unit that issued it, not the run
    #[error("Query failed: {message}\n  Query: {query}")]
    Query { query: String, message: String },

    /// Loading a batch into the target table failed
    #[error("Load failed for table {table}: {message}")]
    Load { table: String, message: String },

    /// Sequence reconciliation failed in a way that cannot be reported
    #[error("Sequence reconciliation failed for {table}.{column}: {message}")]
    Sequence {
        table: String,
        column: String,
        message: String,
    },

    /// Unknown migration unit or group name on the command line
    #[error("Unknown migration unit: {0}")]
    UnknownUnit(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MigrateError {
    /// Create a Pool error with context about where it occurred
    pub fn pool(message: impl Into<String>, context: impl Into<String>) -> Self {
        MigrateError::Pool {
            message: message.into(),
            context: context.into(),
        }
    }

    /// Create a Resolve error
    pub fn resolve(table: impl Into<String>, message: impl Into<String>) -> Self {
        MigrateError::Resolve {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a Load error
    pub fn load(table: impl Into<String>, message: impl Into<String>) -> Self {
        MigrateError::Load {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a Query error
    pub fn query(query: impl Into<String>, message: impl Into<String>) -> Self {
        MigrateError::Query {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create a Sequence error
    pub fn sequence(
        table: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        MigrateError::Sequence {
            table: table.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    /// Whether the error means the run itself can no longer make progress.
    ///
    /// Connectivity failures abort the whole run; anything else is scoped to
    /// the unit that produced it and the orchestrator moves on to independent
    /// units.
    pub fn is_run_fatal(&self) -> bool {
        matches!(
            self,
            MigrateError::Pool { .. } | MigrateError::Config(_) | MigrateError::UnknownUnit(_)
        )
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_connectivity_class_errors_abort_the_run() {
        assert!(MigrateError::pool("refused", "connecting").is_run_fatal());
        assert!(MigrateError::Config("bad yaml".into()).is_run_fatal());
        assert!(MigrateError::UnknownUnit("nope".into()).is_run_fatal());

        assert!(!MigrateError::query("SELECT 1", "syntax error").is_run_fatal());
        assert!(!MigrateError::resolve("socios", "missing table").is_run_fatal());
        assert!(!MigrateError::load("socios", "constraint").is_run_fatal());
        assert!(!MigrateError::sequence("socios", "id", "denied").is_run_fatal());
    }

    #[test]
    fn query_errors_carry_the_statement() {
        let e = MigrateError::query("SELECT socio FROM socios", "invalid column");
        let text = e.to_string();
        assert!(text.contains("invalid column"));
        assert!(text.contains("SELECT socio FROM socios"));
    }
}

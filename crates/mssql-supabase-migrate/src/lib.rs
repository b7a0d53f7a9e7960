//! # mssql-supabase-migrate
//!
//! Batch migration of an association's membership and accounting data from a
//! legacy SQL Server database into Supabase Postgres.
//!
//! The library is organized around declarative [`units::MigrationUnit`]s: each
//! unit names a source extract, the field transforms that produce the target
//! row, the reference tables its foreign keys resolve against and how batches
//! reach the target (full reload or keyed upsert). The [`orchestrator`] runs
//! units in dependency order with per-unit failure isolation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mssql_supabase_migrate::{units, Config, MssqlPool, Orchestrator, PgPool};
//!
//! #[tokio::main]
//! async fn main() -> mssql_supabase_migrate::Result<()> {
//!     let config = Config::from_env()?;
//!     let source = MssqlPool::new(config.source.clone(), 4).await?;
//!     let target = PgPool::new(&config.target, 4).await?;
//!
//!     let selected = units::select("socios")?;
//!     let orchestrator = Orchestrator::new(&source, &target, &config.migration, false);
//!     let report = orchestrator.run(&selected).await?;
//!     println!("{}", report.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod mapper;
pub mod orchestrator;
pub mod report;
pub mod resolver;
pub mod row;
pub mod sequence;
pub mod source;
pub mod target;
pub mod units;
pub mod value;

#[cfg(test)]
mod testutil;

// Re-exports for convenient access
pub use config::{Config, MigrationConfig, SourceConfig, TargetConfig};
pub use error::{MigrateError, Result};
pub use loader::{patch_column, PatchOptions, PatchReport};
pub use orchestrator::Orchestrator;
pub use report::{MigrationReport, SequenceOutcome, UnitReport};
pub use sequence::SequenceReconciler;
pub use source::{MssqlPool, SourceStore};
pub use target::{PgPool, TargetStore};
pub use value::SqlValue;

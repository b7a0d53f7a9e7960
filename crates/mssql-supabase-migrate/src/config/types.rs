//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source database configuration (SQL Server).
    pub source: SourceConfig,

    /// Target database configuration (Supabase Postgres).
    pub target: TargetConfig,

    /// Migration behavior configuration.
    #[serde(default)]
    pub migration: MigrationConfig,
}

/// Source database (SQL Server) configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Database host.
    pub host: String,

    /// Database port (default: 1433).
    #[serde(default = "default_mssql_port")]
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    pub password: String,

    /// Source schema (default: "dbo").
    #[serde(default = "default_dbo_schema")]
    pub schema: String,

    /// Encrypt connection (default: false, legacy servers rarely support it).
    #[serde(default)]
    pub encrypt: bool,

    /// Trust server certificate (default: true).
    #[serde(default = "default_true")]
    pub trust_server_cert: bool,
}

/// Target database configuration.
///
/// Supabase exposes a plain Postgres endpoint; the service-role credential
/// goes in `password` so writes bypass row level security.
#[derive(Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Database host.
    pub host: String,

    /// Database port (default: 5432).
    #[serde(default = "default_pg_port")]
    pub port: u16,

    /// Database name (default: "postgres").
    #[serde(default = "default_pg_database")]
    pub database: String,

    /// Role to connect as (default: "service_role").
    #[serde(default = "default_service_role")]
    pub user: String,

    /// Service-role key / password.
    pub password: String,

    /// Target schema (default: "public").
    #[serde(default = "default_public_schema")]
    pub schema: String,
}

// Credentials stay out of logs: Debug renders them masked.
impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("schema", &self.schema)
            .field("encrypt", &self.encrypt)
            .field("trust_server_cert", &self.trust_server_cert)
            .finish()
    }
}

impl std::fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("schema", &self.schema)
            .finish()
    }
}

/// Migration behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Rows per INSERT batch for wide tables (default: 100).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Rows per INSERT batch for narrow detail tables (default: 1000).
    #[serde(default = "default_detail_batch_size")]
    pub detail_batch_size: usize,

    /// Page size when loading reference tables into memory (default: 1000).
    #[serde(default = "default_reference_page_size")]
    pub reference_page_size: usize,

    /// Concurrent UPDATE statements for the column patch utility (default: 50).
    #[serde(default = "default_patch_concurrency")]
    pub patch_concurrency: usize,

    /// Maximum SQL Server connections (default: 4).
    #[serde(default = "default_pool_size")]
    pub max_mssql_connections: usize,

    /// Maximum Postgres connections (default: 4).
    #[serde(default = "default_pool_size")]
    pub max_pg_connections: usize,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        MigrationConfig {
            batch_size: default_batch_size(),
            detail_batch_size: default_detail_batch_size(),
            reference_page_size: default_reference_page_size(),
            patch_concurrency: default_patch_concurrency(),
            max_mssql_connections: default_pool_size(),
            max_pg_connections: default_pool_size(),
        }
    }
}

// Default value functions for serde
fn default_mssql_port() -> u16 {
    1433
}

fn default_pg_port() -> u16 {
    5432
}

fn default_pg_database() -> String {
    "postgres".to_string()
}

fn default_service_role() -> String {
    "service_role".to_string()
}

fn default_dbo_schema() -> String {
    "dbo".to_string()
}

fn default_public_schema() -> String {
    "public".to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_detail_batch_size() -> usize {
    1000
}

fn default_reference_page_size() -> usize {
    1000
}

fn default_patch_concurrency() -> usize {
    50
}

fn default_pool_size() -> usize {
    4
}

fn default_true() -> bool {
    true
}

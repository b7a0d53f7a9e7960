//! Configuration loading and validation.
//!
//! Configuration comes from a YAML file or from environment variables
//! (`SQLSERVER_*` / `SUPABASE_*`), with the YAML form taking precedence when
//! both are present.

mod types;
mod validation;

pub use types::*;

use std::path::Path;

use crate::error::{MigrateError, Result};

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from environment variables.
    ///
    /// Expected variables: `SQLSERVER_HOST`, `SQLSERVER_PORT`, `SQLSERVER_DB`,
    /// `SQLSERVER_USER`, `SQLSERVER_PASSWORD`, `SUPABASE_DB_HOST`,
    /// `SUPABASE_DB_PORT`, `SUPABASE_DB_NAME`, `SUPABASE_DB_USER` and
    /// `SUPABASE_SERVICE_ROLE_KEY`.
    pub fn from_env() -> Result<Self> {
        let config = Config {
            source: SourceConfig {
                host: require_env("SQLSERVER_HOST")?,
                port: parse_env("SQLSERVER_PORT", 1433)?,
                database: require_env("SQLSERVER_DB")?,
                user: require_env("SQLSERVER_USER")?,
                password: require_env("SQLSERVER_PASSWORD")?,
                schema: optional_env("SQLSERVER_SCHEMA").unwrap_or_else(|| "dbo".into()),
                encrypt: optional_env("SQLSERVER_ENCRYPT")
                    .map(|v| matches!(v.to_lowercase().as_str(), "true" | "yes" | "1"))
                    .unwrap_or(false),
                trust_server_cert: true,
            },
            target: TargetConfig {
                host: require_env("SUPABASE_DB_HOST")?,
                port: parse_env("SUPABASE_DB_PORT", 5432)?,
                database: optional_env("SUPABASE_DB_NAME").unwrap_or_else(|| "postgres".into()),
                user: optional_env("SUPABASE_DB_USER").unwrap_or_else(|| "service_role".into()),
                password: require_env("SUPABASE_SERVICE_ROLE_KEY")?,
                schema: optional_env("SUPABASE_DB_SCHEMA").unwrap_or_else(|| "public".into()),
            },
            migration: MigrationConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| MigrateError::Config(format!("environment variable {} is required", name)))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_env(name: &str, default: u16) -> Result<u16> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => v
            .parse()
            .map_err(|_| MigrateError::Config(format!("{} must be a port number", name))),
        _ => Ok(default),
    }
}

impl SourceConfig {
    /// Build a connection string for tiberius.
    pub fn connection_string(&self) -> String {
        format!(
            "Server=tcp:{},{};Database={};User Id={};Password={};Encrypt={};TrustServerCertificate={}",
            self.host,
            self.port,
            self.database,
            self.user,
            self.password,
            self.encrypt,
            self.trust_server_cert
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_round_trip_with_defaults() {
        let yaml = r#"
source:
  host: legacy-sql.local
  database: asociacion
  user: sa
  password: pw
target:
  host: db.project.supabase.co
  password: srk
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.source.port, 1433);
        assert_eq!(config.source.schema, "dbo");
        assert_eq!(config.target.database, "postgres");
        assert_eq!(config.target.user, "service_role");
        assert_eq!(config.migration.batch_size, 100);
        assert_eq!(config.migration.detail_batch_size, 1000);
        assert_eq!(config.migration.reference_page_size, 1000);
    }

    #[test]
    fn debug_output_masks_credentials() {
        let yaml = r#"
source:
  host: h
  database: d
  user: u
  password: source-secret
target:
  host: t
  password: target-secret
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("source-secret"));
        assert!(!rendered.contains("target-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn connection_string_shape() {
        let yaml = r#"
source:
  host: h
  database: d
  user: u
  password: p
target:
  host: t
  password: k
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let cs = config.source.connection_string();
        assert!(cs.contains("Server=tcp:h,1433"));
        assert!(cs.contains("TrustServerCertificate=true"));
    }
}

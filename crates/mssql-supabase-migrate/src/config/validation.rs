//! Configuration validation.

use super::Config;
use crate::error::{MigrateError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Source validation
    if config.source.host.is_empty() {
        return Err(MigrateError::Config("source.host is required".into()));
    }
    if config.source.database.is_empty() {
        return Err(MigrateError::Config("source.database is required".into()));
    }
    if config.source.user.is_empty() {
        return Err(MigrateError::Config("source.user is required".into()));
    }

    // Target validation
    if config.target.host.is_empty() {
        return Err(MigrateError::Config("target.host is required".into()));
    }
    if config.target.password.is_empty() {
        return Err(MigrateError::Config(
            "target.password (service-role key) is required".into(),
        ));
    }

    // Migration knobs must stay positive; zero would spin forever on paging
    if config.migration.batch_size == 0 {
        return Err(MigrateError::Config(
            "migration.batch_size must be at least 1".into(),
        ));
    }
    if config.migration.detail_batch_size == 0 {
        return Err(MigrateError::Config(
            "migration.detail_batch_size must be at least 1".into(),
        ));
    }
    if config.migration.reference_page_size == 0 {
        return Err(MigrateError::Config(
            "migration.reference_page_size must be at least 1".into(),
        ));
    }
    if config.migration.patch_concurrency == 0 {
        return Err(MigrateError::Config(
            "migration.patch_concurrency must be at least 1".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MigrationConfig, SourceConfig, TargetConfig};

    fn valid_config() -> Config {
        Config {
            source: SourceConfig {
                host: "legacy-sql.local".to_string(),
                port: 1433,
                database: "asociacion".to_string(),
                user: "sa".to_string(),
                password: "password".to_string(),
                schema: "dbo".to_string(),
                encrypt: false,
                trust_server_cert: true,
            },
            target: TargetConfig {
                host: "db.project.supabase.co".to_string(),
                port: 5432,
                database: "postgres".to_string(),
                user: "service_role".to_string(),
                password: "service-role-key".to_string(),
                schema: "public".to_string(),
            },
            migration: MigrationConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_missing_source_host() {
        let mut config = valid_config();
        config.source.host = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_missing_service_role_key() {
        let mut config = valid_config();
        config.target.password = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_batch_size() {
        let mut config = valid_config();
        config.migration.batch_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_reference_page_size() {
        let mut config = valid_config();
        config.migration.reference_page_size = 0;
        assert!(validate(&config).is_err());
    }
}

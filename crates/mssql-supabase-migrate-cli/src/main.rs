//! asoc-migrate CLI - legacy SQL Server to Supabase data migration.

use clap::{Parser, Subcommand};
use mssql_supabase_migrate::{
    patch_column, units, Config, MigrateError, MssqlPool, Orchestrator, PatchOptions, PgPool,
    SequenceReconciler, SequenceOutcome, TargetStore,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "asoc-migrate")]
#[command(about = "Migrate association membership and accounting data to Supabase")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file; falls back to environment variables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate a unit or group of units (e.g. socios, cuentas-corrientes, all)
    Run {
        /// Unit or group name
        unit: String,

        /// Read and map everything, write nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Back-fill one column on an already migrated table from the source
    PatchColumn {
        /// Source table to read
        #[arg(long, default_value = "socios")]
        source_table: String,

        /// Source key column
        #[arg(long, default_value = "socio")]
        source_key: String,

        /// Source column to copy
        #[arg(long, default_value = "email")]
        source_column: String,

        /// Target table to update
        #[arg(long, default_value = "socios")]
        target_table: String,

        /// Target key column
        #[arg(long, default_value = "id")]
        target_key: String,

        /// Target column to write
        #[arg(long, default_value = "email")]
        target_column: String,

        /// Touch only rows whose target column is currently NULL
        #[arg(long)]
        only_missing: bool,

        /// Report what would change without updating anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Align identity sequences with the loaded data after explicit-id inserts
    ResetSequences,

    /// Test database connections
    HealthCheck,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<bool, MigrateError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format)
        .map_err(MigrateError::Config)?;

    // .env is a convenience for local runs; absence is fine.
    dotenvy::dotenv().ok();

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => Config::from_env()?,
    };

    match cli.command {
        Commands::Run { unit, dry_run } => {
            let selected = units::select(&unit)?;
            info!(
                units = selected.len(),
                dry_run, "starting migration for '{}'", unit
            );

            let source =
                MssqlPool::new(config.source.clone(), config.migration.max_mssql_connections as u32)
                    .await?;
            let target = PgPool::new(&config.target, config.migration.max_pg_connections).await?;

            let orchestrator = Orchestrator::new(&source, &target, &config.migration, dry_run);
            let report = orchestrator.run(&selected).await?;

            if cli.output_json {
                println!("{}", report.to_json()?);
            } else {
                let status = if dry_run {
                    "Dry run completed"
                } else if report.is_success() {
                    "Migration completed"
                } else {
                    "Migration completed with failures"
                };
                println!("\n{} in {:.2}s", status, report.duration_secs());
                for unit in &report.units {
                    println!(
                        "  {}: read {}, written {}, skipped {}, errored {}{}",
                        unit.unit,
                        unit.read,
                        unit.inserted,
                        unit.skipped.len(),
                        unit.errored,
                        match &unit.fatal {
                            Some(reason) => format!(" - FAILED: {}", reason),
                            None => String::new(),
                        }
                    );
                    if let Some(SequenceOutcome::Reported { statement }) = &unit.sequence {
                        println!("    run manually: {}", statement);
                    }
                }
            }
            Ok(report.is_success())
        }

        Commands::PatchColumn {
            source_table,
            source_key,
            source_column,
            target_table,
            target_key,
            target_column,
            only_missing,
            dry_run,
        } => {
            let source =
                MssqlPool::new(config.source.clone(), config.migration.max_mssql_connections as u32)
                    .await?;
            let target = PgPool::new(&config.target, config.migration.max_pg_connections).await?;

            let opts = PatchOptions {
                source_table,
                source_key_column: source_key,
                source_column,
                target_table,
                target_key_column: target_key,
                target_column,
                dry_run,
                only_missing,
                concurrency: config.migration.patch_concurrency,
                reference_page_size: config.migration.reference_page_size,
            };
            let report = patch_column(&source, &target, &opts).await?;

            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("\nPatch {}:", if dry_run { "dry run" } else { "completed" });
                println!("  Read: {}", report.read);
                println!("  Updated: {}", report.updated);
                println!("  Skipped (empty source): {}", report.skipped_empty_source);
                println!("  Skipped (already set): {}", report.skipped_already_set);
                println!("  Errored: {}", report.errored);
            }
            Ok(report.errored == 0)
        }

        Commands::ResetSequences => {
            let target = PgPool::new(&config.target, config.migration.max_pg_connections).await?;
            let reconciler = SequenceReconciler::new(&target);

            let mut all_applied = true;
            for (table, column) in units::SEQUENCE_TABLES {
                match reconciler.reconcile(table, column).await? {
                    SequenceOutcome::Applied { next_value } => {
                        println!("  {}.{}: next value {}", table, column, next_value);
                    }
                    SequenceOutcome::Reported { statement } => {
                        all_applied = false;
                        println!("  {}.{}: setval denied, run manually:", table, column);
                        println!("    {}", statement);
                    }
                }
            }
            Ok(all_applied)
        }

        Commands::HealthCheck => {
            let source_result =
                MssqlPool::new(config.source.clone(), 1).await;
            let target_result = PgPool::new(&config.target, 1).await;

            let source_ok = source_result.is_ok();
            let target_ok = match &target_result {
                Ok(pool) => pool.ping().await.is_ok(),
                Err(_) => false,
            };

            println!("Health Check Results:");
            match &source_result {
                Ok(_) => println!("  Source (SQL Server): OK"),
                Err(e) => println!("  Source (SQL Server): FAILED\n    Error: {}", e),
            }
            match &target_result {
                Ok(_) if target_ok => println!("  Target (Supabase Postgres): OK"),
                Ok(_) => println!("  Target (Supabase Postgres): FAILED ping"),
                Err(e) => println!("  Target (Supabase Postgres): FAILED\n    Error: {}", e),
            }
            println!(
                "\n  Overall: {}",
                if source_ok && target_ok { "HEALTHY" } else { "UNHEALTHY" }
            );
            Ok(source_ok && target_ok)
        }
    }
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}

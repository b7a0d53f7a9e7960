//! Postgres target database operations.
//!
//! The target is a Supabase-hosted Postgres reached over its plain database
//! endpoint with the service-role credential, so every write bypasses row
//! level security the same way the hosted REST layer's service key would.

use async_trait::async_trait;
use deadpool_postgres::{Config as PoolConfig, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;
use tracing::{debug, info};

use crate::config::TargetConfig;
use crate::error::{MigrateError, Result};
use crate::value::{sql_value_to_literal, SqlNullType, SqlValue};

/// Trait for target database operations.
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Remove every row from a table.
    async fn delete_all(&self, table: &str) -> Result<()>;

    /// Insert one chunk of rows. Returns the number of rows written.
    async fn insert_chunk(
        &self,
        table: &str,
        cols: &[String],
        rows: &[Vec<SqlValue>],
    ) -> Result<u64>;

    /// Upsert one chunk of rows keyed on `key_cols`.
    async fn upsert_chunk(
        &self,
        table: &str,
        cols: &[String],
        key_cols: &[String],
        rows: &[Vec<SqlValue>],
    ) -> Result<u64>;

    /// Update a single column of a single row. Returns rows affected.
    async fn update_value(
        &self,
        table: &str,
        key_col: &str,
        key: &SqlValue,
        col: &str,
        value: &SqlValue,
    ) -> Result<u64>;

    /// Read one page of a reference table, ordered by its key columns.
    /// Key parts come back as their textual form.
    async fn fetch_reference_page(
        &self,
        table: &str,
        key_cols: &[String],
        value_col: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<(Vec<SqlValue>, SqlValue)>>;

    /// MAX of a numeric column, 0 for an empty table.
    async fn max_value(&self, table: &str, col: &str) -> Result<i64>;

    /// Point the backing sequence of `table.col` at `next`.
    async fn set_sequence(&self, table: &str, col: &str, next: i64) -> Result<()>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<()>;
}

/// Pooled Postgres target.
pub struct PgPool {
    pool: Pool,
    schema: String,
}

impl PgPool {
    /// Create a new target pool and verify connectivity.
    pub async fn new(config: &TargetConfig, max_conns: usize) -> Result<Self> {
        let mut pool_config = PoolConfig::new();
        pool_config.host = Some(config.host.clone());
        pool_config.port = Some(config.port);
        pool_config.dbname = Some(config.database.clone());
        pool_config.user = Some(config.user.clone());
        pool_config.password = Some(config.password.clone());
        pool_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        if let Some(ps) = pool_config.pool.as_mut() {
            ps.max_size = max_conns;
        } else {
            pool_config.pool = Some(deadpool_postgres::PoolConfig::new(max_conns));
        }

        let pool = pool_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| MigrateError::pool(e.to_string(), "creating Postgres pool"))?;

        {
            let client = pool
                .get()
                .await
                .map_err(|e| MigrateError::pool(e.to_string(), "checking Postgres connection"))?;
            client.simple_query("SELECT 1").await?;
        }

        info!(
            "Connected to Postgres: {}:{}/{} (pool_size={})",
            config.host, config.port, config.database, max_conns
        );

        Ok(Self {
            pool,
            schema: config.schema.clone(),
        })
    }

    async fn client(&self) -> Result<deadpool_postgres::Object> {
        self.pool
            .get()
            .await
            .map_err(|e| MigrateError::pool(e.to_string(), "getting Postgres connection"))
    }

    fn qualify(&self, table: &str) -> String {
        format!("\"{}\".\"{}\"", self.schema, table)
    }
}

#[async_trait]
impl TargetStore for PgPool {
    async fn delete_all(&self, table: &str) -> Result<()> {
        let client = self.client().await?;
        let sql = format!("DELETE FROM {}", self.qualify(table));
        client
            .execute(&sql, &[])
            .await
            .map_err(|e| MigrateError::load(table, e.to_string()))?;
        debug!(table, "deleted all rows");
        Ok(())
    }

    async fn insert_chunk(
        &self,
        table: &str,
        cols: &[String],
        rows: &[Vec<SqlValue>],
    ) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        let client = self.client().await?;
        let sql = build_insert_sql(&self.schema, table, cols, rows);
        client
            .execute(&sql, &[])
            .await
            .map_err(|e| MigrateError::load(table, e.to_string()))
    }

    async fn upsert_chunk(
        &self,
        table: &str,
        cols: &[String],
        key_cols: &[String],
        rows: &[Vec<SqlValue>],
    ) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        let client = self.client().await?;
        let sql = build_upsert_sql(&self.schema, table, cols, key_cols, rows);
        client
            .execute(&sql, &[])
            .await
            .map_err(|e| MigrateError::load(table, e.to_string()))
    }

    async fn update_value(
        &self,
        table: &str,
        key_col: &str,
        key: &SqlValue,
        col: &str,
        value: &SqlValue,
    ) -> Result<u64> {
        let client = self.client().await?;
        let sql = format!(
            "UPDATE {} SET \"{}\" = {} WHERE \"{}\" = {}",
            self.qualify(table),
            col,
            sql_value_to_literal(value),
            key_col,
            sql_value_to_literal(key),
        );
        Ok(client.execute(&sql, &[]).await?)
    }

    async fn fetch_reference_page(
        &self,
        table: &str,
        key_cols: &[String],
        value_col: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<(Vec<SqlValue>, SqlValue)>> {
        let client = self.client().await?;
        // Keys are cast to text so char(n) padding and numeric widths do not
        // leak into map keys; the value column keeps its native type.
        let key_list: String = key_cols
            .iter()
            .map(|c| format!("\"{}\"::text", c))
            .collect::<Vec<_>>()
            .join(", ");
        let order_list: String = key_cols
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {}, \"{}\" FROM {} ORDER BY {} OFFSET {} LIMIT {}",
            key_list,
            value_col,
            self.qualify(table),
            order_list,
            offset,
            limit
        );
        let pg_rows = client
            .query(&sql, &[])
            .await
            .map_err(|e| MigrateError::resolve(table, e.to_string()))?;

        let mut out = Vec::with_capacity(pg_rows.len());
        for row in pg_rows {
            let mut keys = Vec::with_capacity(key_cols.len());
            for i in 0..key_cols.len() {
                let part: Option<String> = row.try_get(i)?;
                keys.push(match part {
                    Some(s) => SqlValue::String(s),
                    None => SqlValue::Null(SqlNullType::String),
                });
            }
            let value = convert_pg_value(&row, key_cols.len())?;
            out.push((keys, value));
        }
        Ok(out)
    }

    async fn max_value(&self, table: &str, col: &str) -> Result<i64> {
        let client = self.client().await?;
        let sql = format!(
            "SELECT COALESCE(MAX(\"{}\")::bigint, 0) FROM {}",
            col,
            self.qualify(table)
        );
        let row = client
            .query_one(&sql, &[])
            .await
            .map_err(|e| MigrateError::sequence(table, col, e.to_string()))?;
        Ok(row.get(0))
    }

    async fn set_sequence(&self, table: &str, col: &str, next: i64) -> Result<()> {
        let client = self.client().await?;
        let sql = format!(
            "SELECT setval(pg_get_serial_sequence('{}.{}', '{}'), {}, false)",
            self.schema, table, col, next
        );
        client
            .execute(&sql, &[])
            .await
            .map_err(|e| MigrateError::sequence(table, col, e.to_string()))?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let client = self.client().await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }
}

/// Convert one cell of a Postgres row into a [`SqlValue`], dispatching on
/// the wire type name.
fn convert_pg_value(row: &tokio_postgres::Row, idx: usize) -> Result<SqlValue> {
    let value = match row.columns()[idx].type_().name() {
        "bool" => row
            .try_get::<_, Option<bool>>(idx)?
            .map(SqlValue::Bool)
            .unwrap_or(SqlValue::Null(SqlNullType::Bool)),
        "int2" => row
            .try_get::<_, Option<i16>>(idx)?
            .map(SqlValue::I16)
            .unwrap_or(SqlValue::Null(SqlNullType::I16)),
        "int4" => row
            .try_get::<_, Option<i32>>(idx)?
            .map(SqlValue::I32)
            .unwrap_or(SqlValue::Null(SqlNullType::I32)),
        "int8" => row
            .try_get::<_, Option<i64>>(idx)?
            .map(SqlValue::I64)
            .unwrap_or(SqlValue::Null(SqlNullType::I64)),
        "float4" => row
            .try_get::<_, Option<f32>>(idx)?
            .map(SqlValue::F32)
            .unwrap_or(SqlValue::Null(SqlNullType::F32)),
        "float8" => row
            .try_get::<_, Option<f64>>(idx)?
            .map(SqlValue::F64)
            .unwrap_or(SqlValue::Null(SqlNullType::F64)),
        "numeric" => row
            .try_get::<_, Option<rust_decimal::Decimal>>(idx)?
            .map(SqlValue::Decimal)
            .unwrap_or(SqlValue::Null(SqlNullType::Decimal)),
        "uuid" => row
            .try_get::<_, Option<uuid::Uuid>>(idx)?
            .map(SqlValue::Uuid)
            .unwrap_or(SqlValue::Null(SqlNullType::Uuid)),
        "date" => row
            .try_get::<_, Option<chrono::NaiveDate>>(idx)?
            .map(SqlValue::Date)
            .unwrap_or(SqlValue::Null(SqlNullType::Date)),
        "timestamp" => row
            .try_get::<_, Option<chrono::NaiveDateTime>>(idx)?
            .map(SqlValue::DateTime)
            .unwrap_or(SqlValue::Null(SqlNullType::DateTime)),
        "timestamptz" => row
            .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)?
            .map(|dt| SqlValue::DateTimeOffset(dt.fixed_offset()))
            .unwrap_or(SqlValue::Null(SqlNullType::DateTimeOffset)),
        _ => row
            .try_get::<_, Option<String>>(idx)?
            .map(SqlValue::String)
            .unwrap_or(SqlValue::Null(SqlNullType::String)),
    };
    Ok(value)
}

/// Build INSERT SQL with literal values (no parameters).
fn build_insert_sql(schema: &str, table: &str, cols: &[String], rows: &[Vec<SqlValue>]) -> String {
    let col_list: String = cols
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ");

    let value_rows: Vec<String> = rows
        .iter()
        .map(|row| {
            let values: Vec<String> = row.iter().map(sql_value_to_literal).collect();
            format!("({})", values.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO \"{}\".\"{}\" ({}) VALUES {}",
        schema,
        table,
        col_list,
        value_rows.join(", ")
    )
}

/// Build UPSERT SQL with literal values (no parameters).
fn build_upsert_sql(
    schema: &str,
    table: &str,
    cols: &[String],
    key_cols: &[String],
    rows: &[Vec<SqlValue>],
) -> String {
    let col_list: String = cols
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ");

    let key_list: String = key_cols
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ");

    // UPDATE SET clause excludes the key columns
    let update_cols: Vec<String> = cols
        .iter()
        .filter(|c| !key_cols.contains(c))
        .map(|c| format!("\"{}\" = EXCLUDED.\"{}\"", c, c))
        .collect();

    let value_rows: Vec<String> = rows
        .iter()
        .map(|row| {
            let values: Vec<String> = row.iter().map(sql_value_to_literal).collect();
            format!("({})", values.join(", "))
        })
        .collect();

    if update_cols.is_empty() {
        format!(
            "INSERT INTO \"{}\".\"{}\" ({}) VALUES {} ON CONFLICT ({}) DO NOTHING",
            schema,
            table,
            col_list,
            value_rows.join(", "),
            key_list
        )
    } else {
        format!(
            "INSERT INTO \"{}\".\"{}\" ({}) VALUES {} ON CONFLICT ({}) DO UPDATE SET {}",
            schema,
            table,
            col_list,
            value_rows.join(", "),
            key_list,
            update_cols.join(", ")
        )
    }
}

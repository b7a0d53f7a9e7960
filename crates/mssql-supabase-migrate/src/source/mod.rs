//! SQL Server source database operations.

use std::sync::Arc;

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use tiberius::{AuthMethod, Client, ColumnType, Config, EncryptionLevel, Row};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::info;

use crate::config::SourceConfig;
use crate::error::{MigrateError, Result};
use crate::row::SourceRow;
use crate::value::{SqlNullType, SqlValue};

/// Trait for source database reads.
///
/// Units only ever run a SELECT and walk the rows, so the seam is one method
/// wide; tests substitute an in-memory implementation.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Run a query and buffer the full result set.
    async fn read(&self, query: &str) -> Result<Vec<SourceRow>>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<()>;
}

/// Connection manager for bb8 pool with tiberius.
#[derive(Clone)]
struct TiberiusConnectionManager {
    config: SourceConfig,
}

impl TiberiusConnectionManager {
    fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    fn build_config(&self) -> Config {
        let mut config = Config::new();
        config.host(&self.config.host);
        config.port(self.config.port);
        config.database(&self.config.database);
        config.authentication(AuthMethod::sql_server(
            &self.config.user,
            &self.config.password,
        ));

        if self.config.encrypt {
            if self.config.trust_server_cert {
                config.trust_cert();
            }
            config.encryption(EncryptionLevel::Required);
        } else {
            config.encryption(EncryptionLevel::NotSupported);
        }

        config
    }
}

#[async_trait]
impl bb8::ManageConnection for TiberiusConnectionManager {
    type Connection = Client<Compat<TcpStream>>;
    type Error = tiberius::error::Error;

    async fn connect(&self) -> std::result::Result<Self::Connection, Self::Error> {
        let config = self.build_config();
        let tcp = TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| tiberius::error::Error::Io {
                kind: e.kind(),
                message: e.to_string(),
            })?;

        tcp.set_nodelay(true).ok();

        Client::connect(config, tcp.compat_write()).await
    }

    async fn is_valid(&self, conn: &mut Self::Connection) -> std::result::Result<(), Self::Error> {
        conn.simple_query("SELECT 1").await?.into_row().await?;
        Ok(())
    }

    fn has_broken(&self, _conn: &mut Self::Connection) -> bool {
        false
    }
}

/// Pooled SQL Server source.
pub struct MssqlPool {
    pool: Pool<TiberiusConnectionManager>,
}

impl MssqlPool {
    /// Create a new source pool and verify connectivity.
    pub async fn new(config: SourceConfig, max_size: u32) -> Result<Self> {
        let host = config.host.clone();
        let port = config.port;
        let database = config.database.clone();

        let manager = TiberiusConnectionManager::new(config);
        let pool = Pool::builder()
            .max_size(max_size)
            .min_idle(Some(1))
            .build(manager)
            .await
            .map_err(|e| MigrateError::pool(e.to_string(), "creating SQL Server pool"))?;

        {
            let mut conn = pool
                .get()
                .await
                .map_err(|e| MigrateError::pool(e.to_string(), "checking SQL Server connection"))?;
            conn.simple_query("SELECT 1")
                .await
                .map_err(MigrateError::Source)?
                .into_row()
                .await
                .map_err(MigrateError::Source)?;
        }

        info!(
            "Connected to SQL Server: {}:{}/{} (pool_size={})",
            host, port, database, max_size
        );

        Ok(Self { pool })
    }

    async fn get_client(&self) -> Result<PooledConnection<'_, TiberiusConnectionManager>> {
        self.pool
            .get()
            .await
            .map_err(|e| MigrateError::pool(e.to_string(), "getting SQL Server connection"))
    }
}

#[async_trait]
impl SourceStore for MssqlPool {
    async fn read(&self, query: &str) -> Result<Vec<SourceRow>> {
        let mut client = self.get_client().await?;

        // Query failures are the unit's problem; pool failures above are the
        // run's.
        let stream = client
            .simple_query(query)
            .await
            .map_err(|e| MigrateError::query(query, e.to_string()))?;
        let raw_rows = stream
            .into_first_result()
            .await
            .map_err(|e| MigrateError::query(query, e.to_string()))?;

        let mut rows = Vec::with_capacity(raw_rows.len());
        let mut columns: Option<Arc<Vec<String>>> = None;
        for row in raw_rows {
            let header = columns
                .get_or_insert_with(|| {
                    Arc::new(row.columns().iter().map(|c| c.name().to_string()).collect())
                })
                .clone();
            rows.push(convert_row(row, header)?);
        }
        Ok(rows)
    }

    async fn ping(&self) -> Result<()> {
        let mut client = self.get_client().await?;
        client
            .simple_query("SELECT 1")
            .await
            .map_err(MigrateError::Source)?
            .into_row()
            .await
            .map_err(MigrateError::Source)?;
        Ok(())
    }
}

fn convert_row(row: Row, columns: Arc<Vec<String>>) -> Result<SourceRow> {
    let types: Vec<ColumnType> = row.columns().iter().map(|c| c.column_type()).collect();
    let mut values = Vec::with_capacity(types.len());
    for (idx, ty) in types.iter().enumerate() {
        values.push(convert_value(&row, idx, *ty)?);
    }
    Ok(SourceRow::new(columns, values))
}

/// Convert one TDS cell into a [`SqlValue`].
///
/// The `*n` column types carry their width per value, so those fall through
/// a widening chain of `try_get` calls instead of trusting a single width.
fn convert_value(row: &Row, idx: usize, ty: ColumnType) -> Result<SqlValue> {
    let value = match ty {
        ColumnType::Null => SqlValue::Null(SqlNullType::String),

        ColumnType::Bit | ColumnType::Bitn => match row.try_get::<bool, _>(idx)? {
            Some(b) => SqlValue::Bool(b),
            None => SqlValue::Null(SqlNullType::Bool),
        },

        ColumnType::Int1 => match row.try_get::<u8, _>(idx)? {
            Some(n) => SqlValue::I16(n as i16),
            None => SqlValue::Null(SqlNullType::I16),
        },
        ColumnType::Int2 => match row.try_get::<i16, _>(idx)? {
            Some(n) => SqlValue::I16(n),
            None => SqlValue::Null(SqlNullType::I16),
        },
        ColumnType::Int4 => match row.try_get::<i32, _>(idx)? {
            Some(n) => SqlValue::I32(n),
            None => SqlValue::Null(SqlNullType::I32),
        },
        ColumnType::Int8 => match row.try_get::<i64, _>(idx)? {
            Some(n) => SqlValue::I64(n),
            None => SqlValue::Null(SqlNullType::I64),
        },
        ColumnType::Intn => {
            if let Ok(Some(n)) = row.try_get::<i64, _>(idx) {
                SqlValue::I64(n)
            } else if let Ok(Some(n)) = row.try_get::<i32, _>(idx) {
                SqlValue::I32(n)
            } else if let Ok(Some(n)) = row.try_get::<i16, _>(idx) {
                SqlValue::I16(n)
            } else if let Ok(Some(n)) = row.try_get::<u8, _>(idx) {
                SqlValue::I16(n as i16)
            } else {
                SqlValue::Null(SqlNullType::I64)
            }
        }

        ColumnType::Float4 => match row.try_get::<f32, _>(idx)? {
            Some(n) => SqlValue::F32(n),
            None => SqlValue::Null(SqlNullType::F32),
        },
        ColumnType::Float8 | ColumnType::Money | ColumnType::Money4 => {
            match row.try_get::<f64, _>(idx)? {
                Some(n) => SqlValue::F64(n),
                None => SqlValue::Null(SqlNullType::F64),
            }
        }
        ColumnType::Floatn => {
            if let Ok(Some(n)) = row.try_get::<f64, _>(idx) {
                SqlValue::F64(n)
            } else if let Ok(Some(n)) = row.try_get::<f32, _>(idx) {
                SqlValue::F32(n)
            } else {
                SqlValue::Null(SqlNullType::F64)
            }
        }

        ColumnType::Decimaln | ColumnType::Numericn => {
            match row.try_get::<rust_decimal::Decimal, _>(idx)? {
                Some(d) => SqlValue::Decimal(d),
                None => SqlValue::Null(SqlNullType::Decimal),
            }
        }

        ColumnType::Guid => match row.try_get::<uuid::Uuid, _>(idx)? {
            Some(u) => SqlValue::Uuid(u),
            None => SqlValue::Null(SqlNullType::Uuid),
        },

        ColumnType::Datetime
        | ColumnType::Datetime4
        | ColumnType::Datetimen
        | ColumnType::Datetime2 => match row.try_get::<chrono::NaiveDateTime, _>(idx)? {
            Some(dt) => SqlValue::DateTime(dt),
            None => SqlValue::Null(SqlNullType::DateTime),
        },
        ColumnType::Daten => match row.try_get::<chrono::NaiveDate, _>(idx)? {
            Some(d) => SqlValue::Date(d),
            None => SqlValue::Null(SqlNullType::Date),
        },
        ColumnType::Timen => match row.try_get::<chrono::NaiveTime, _>(idx)? {
            Some(t) => SqlValue::Time(t),
            None => SqlValue::Null(SqlNullType::Time),
        },
        ColumnType::DatetimeOffsetn => {
            match row.try_get::<chrono::DateTime<chrono::Utc>, _>(idx)? {
                Some(dt) => SqlValue::DateTimeOffset(dt.fixed_offset()),
                None => SqlValue::Null(SqlNullType::DateTimeOffset),
            }
        }

        ColumnType::BigBinary | ColumnType::BigVarBin | ColumnType::Image => {
            match row.try_get::<&[u8], _>(idx)? {
                Some(b) => SqlValue::Bytes(b.to_vec()),
                None => SqlValue::Null(SqlNullType::Bytes),
            }
        }

        // char/varchar/nchar/nvarchar/text and anything else textual
        _ => match row.try_get::<&str, _>(idx)? {
            Some(s) => SqlValue::String(s.to_string()),
            None => SqlValue::Null(SqlNullType::String),
        },
    };
    Ok(value)
}

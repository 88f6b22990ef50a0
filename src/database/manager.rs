use std::time::{Duration, Instant};

use serde_json::Value;
use sqlx::error::DatabaseError as _;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::database::query_builder::{bind_param, SqlStatement};

/// Which database rule a write broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl ConstraintKind {
    /// Map a PostgreSQL SQLSTATE to a constraint kind (class 23, integrity violations).
    pub fn from_sqlstate(code: &str) -> Option<Self> {
        match code {
            "23505" => Some(Self::Unique),
            "23503" => Some(Self::ForeignKey),
            "23502" => Some(Self::NotNull),
            "23514" => Some(Self::Check),
            _ => None,
        }
    }
}

/// Errors from the data access gateway
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation ({code}): {message}")]
    ConstraintViolation {
        kind: ConstraintKind,
        code: String,
        constraint: Option<String>,
        message: String,
    },

    #[error("Invalid input ({code}): {message}")]
    InvalidInput { code: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
                let message = db_err.message().to_string();

                if let Some(kind) = ConstraintKind::from_sqlstate(&code) {
                    return DatabaseError::ConstraintViolation {
                        kind,
                        constraint: db_err.constraint().map(str::to_string),
                        code,
                        message,
                    };
                }
                // Class 22: data exceptions (bad casts, out-of-range values, malformed dates).
                // 42804/42846: a bound value that has no cast to the column type
                if code.starts_with("22") || code == "42804" || code == "42846" {
                    return DatabaseError::InvalidInput { code, message };
                }
                // Class 08: connection exceptions; 57P0x: server shutting down
                if code.starts_with("08") || code.starts_with("57P0") {
                    return DatabaseError::ConnectionError(message);
                }
                DatabaseError::QueryError(format!("{} ({})", message, code))
            }
            sqlx::Error::RowNotFound => DatabaseError::NotFound("row not found".to_string()),
            sqlx::Error::Io(e) => DatabaseError::ConnectionError(e.to_string()),
            sqlx::Error::Tls(e) => DatabaseError::ConnectionError(e.to_string()),
            sqlx::Error::PoolTimedOut => {
                DatabaseError::ConnectionError("timed out waiting for a pooled connection".to_string())
            }
            sqlx::Error::PoolClosed => DatabaseError::ConnectionError("connection pool is closed".to_string()),
            sqlx::Error::WorkerCrashed => DatabaseError::ConnectionError("connection worker crashed".to_string()),
            sqlx::Error::Configuration(e) => DatabaseError::ConnectionError(e.to_string()),
            other => DatabaseError::QueryError(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationError(err.to_string())
    }
}

#[derive(Debug, Clone)]
struct QueryLogging {
    enabled: bool,
    slow_warning: bool,
    slow_threshold: Duration,
}

/// Owned handle to the connection pool. Cloning is cheap; all clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
    name: String,
    logging: QueryLogging,
}

impl Database {
    /// Build the pool without opening a connection. Connections are opened on first use
    /// and reused afterwards; at most `max_connections` are open at once and further
    /// callers wait up to `connection_timeout` seconds for one to free up.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let connection_string = Self::build_connection_string(config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .connect_lazy(&connection_string)?;

        info!(
            "Configured database pool for {} (max {} connections)",
            Self::database_name(&connection_string),
            config.max_connections
        );

        Ok(Self::from_pool(pool, config, Self::database_name(&connection_string)))
    }

    pub fn from_pool(pool: PgPool, config: &DatabaseConfig, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
            logging: QueryLogging {
                enabled: config.enable_query_logging,
                slow_warning: config.enable_slow_query_warning,
                slow_threshold: Duration::from_millis(config.slow_query_threshold_ms),
            },
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Name of the database this pool points at
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Use DATABASE_URL when given, otherwise assemble one from the individual DB_* settings.
    pub fn build_connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
        if let Some(url) = &config.url {
            let parsed = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
            return Ok(parsed.into());
        }

        let user = config.user.as_deref().ok_or(DatabaseError::ConfigMissing("DB_USER"))?;

        let mut url = url::Url::parse("postgres://localhost").map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_host(Some(&config.host)).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_port(Some(config.port)).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_username(user).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_password(config.password.as_deref()).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_path(&format!("/{}", config.name));
        Ok(url.into())
    }

    fn database_name(connection_string: &str) -> String {
        url::Url::parse(connection_string)
            .ok()
            .map(|u| u.path().trim_start_matches('/').to_string())
            .unwrap_or_default()
    }

    /// Run a SELECT and return every row as a JSON object
    pub async fn fetch_all(&self, stmt: &SqlStatement) -> Result<Vec<Value>, DatabaseError> {
        let sql = Self::wrap_as_json(&stmt.query);
        let started = self.log_start(stmt);

        let mut q = sqlx::query(&sql);
        for p in stmt.params.iter() {
            q = bind_param(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        self.log_finish(stmt, started);

        rows.iter()
            .map(|row| row.try_get::<Value, _>("row").map_err(DatabaseError::from))
            .collect()
    }

    /// Run a SELECT expected to match at most one row
    pub async fn fetch_optional(&self, stmt: &SqlStatement) -> Result<Option<Value>, DatabaseError> {
        let sql = Self::wrap_as_json(&stmt.query);
        let started = self.log_start(stmt);

        let mut q = sqlx::query(&sql);
        for p in stmt.params.iter() {
            q = bind_param(q, p);
        }
        let row = q.fetch_optional(&self.pool).await?;
        self.log_finish(stmt, started);

        match row {
            Some(row) => Ok(Some(row.try_get::<Value, _>("row")?)),
            None => Ok(None),
        }
    }

    /// Run an INSERT ... RETURNING id and hand back the new identifier
    pub async fn insert_returning_id(&self, stmt: &SqlStatement) -> Result<i64, DatabaseError> {
        let started = self.log_start(stmt);

        let mut q = sqlx::query(&stmt.query);
        for p in stmt.params.iter() {
            q = bind_param(q, p);
        }
        let row = q.fetch_one(&self.pool).await?;
        self.log_finish(stmt, started);

        Ok(row.try_get::<i64, _>("id")?)
    }

    /// Run an UPDATE or DELETE and return the affected row count
    pub async fn execute(&self, stmt: &SqlStatement) -> Result<u64, DatabaseError> {
        let started = self.log_start(stmt);

        let mut q = sqlx::query(&stmt.query);
        for p in stmt.params.iter() {
            q = bind_param(q, p);
        }
        let result = q.execute(&self.pool).await?;
        self.log_finish(stmt, started);

        Ok(result.rows_affected())
    }

    /// Pings the pool to ensure connectivity
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool: {}", self.name);
    }

    // row_to_json keeps column names and lets postgres render numerics, dates and nulls
    fn wrap_as_json(select: &str) -> String {
        format!("SELECT row_to_json(t) AS row FROM ({}) t", select)
    }

    fn log_start(&self, stmt: &SqlStatement) -> Instant {
        if self.logging.enabled {
            debug!(sql = %stmt.query, params = ?stmt.params, "executing statement");
        }
        Instant::now()
    }

    fn log_finish(&self, stmt: &SqlStatement, started: Instant) {
        let elapsed = started.elapsed();
        if self.logging.slow_warning && elapsed >= self.logging.slow_threshold {
            warn!(
                sql = %stmt.query,
                elapsed_ms = elapsed.as_millis() as u64,
                "slow query"
            );
        }
    }
}

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use domain::DomainError;
use std::time::Duration;
use tracing::{error, info};

pub mod migrations;
pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether a store call reads or writes, for error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Read,
    Write,
}

impl StoreOp {
    fn failure(self, message: String) -> DomainError {
        match self {
            StoreOp::Read => DomainError::QueryFailure(message),
            StoreOp::Write => DomainError::WriteFailure(message),
        }
    }
}

#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout.as_millis()
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the SQLite file and applies pending migrations.
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        info!(database_path, "Opening database");

        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let pool = r2d2::Pool::builder()
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout: BUSY_TIMEOUT,
            }))
            .build(manager)
            .map_err(|e| {
                error!(database_path, error = %e, "Failed to create SQLite connection pool");
                DomainError::QueryFailure(format!("failed to open database: {}", e))
            })?;

        let mut conn = pool
            .get()
            .map_err(|e| DomainError::QueryFailure(e.to_string()))?;
        conn.batch_execute("PRAGMA journal_mode = WAL;")
            .map_err(|e| DomainError::WriteFailure(e.to_string()))?;
        migrations::apply_migrations(&mut conn)?;

        info!(
            database_path,
            schema_version = migrations::latest_version(),
            "Database ready"
        );
        Ok(Database { pool })
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Runs a blocking Diesel closure on the blocking thread pool.
pub(crate) async fn run_blocking<T, F>(pool: &SqlitePool, op: StoreOp, f: F) -> Result<T, DomainError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(|e| op.failure(e.to_string()))?;
        f(&mut conn).map_err(|e| op.failure(e.to_string()))
    })
    .await
    .map_err(|e| op.failure(e.to_string()))?
}

//! Versioned schema migrations, mirrored to `PRAGMA user_version`.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use domain::DomainError;
use tracing::info;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: i32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

#[derive(QueryableByName)]
struct UserVersion {
    #[diesel(sql_type = Integer)]
    user_version: i32,
}

pub fn latest_version() -> i32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies every migration newer than the database, in one transaction.
pub fn apply_migrations(conn: &mut SqliteConnection) -> Result<(), DomainError> {
    let current = current_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(DomainError::QueryFailure(format!(
            "database schema version {} is newer than supported version {}",
            current, latest
        )));
    }

    if current == latest {
        return Ok(());
    }

    conn.immediate_transaction(|conn| {
        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            conn.batch_execute(migration.sql)?;
            conn.batch_execute(&format!("PRAGMA user_version = {};", migration.version))?;
            info!(version = migration.version, "Applied schema migration");
        }
        Ok::<_, diesel::result::Error>(())
    })
    .map_err(|e| DomainError::WriteFailure(format!("schema migration failed: {}", e)))
}

pub fn current_version(conn: &mut SqliteConnection) -> Result<i32, DomainError> {
    diesel::sql_query("PRAGMA user_version")
        .get_result::<UserVersion>(conn)
        .map(|row| row.user_version)
        .map_err(|e| DomainError::QueryFailure(e.to_string()))
}

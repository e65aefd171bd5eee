//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Version 1 adopts tables created by the earlier unversioned schema
//!   (`user_version = 0`, no `owner` column) instead of failing on them.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

/// Tables that carry a tenant `owner` column.
const OWNED_TABLES: &[&str] = &["properties", "contacts", "tasks"];

#[derive(Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
    /// Runs after `sql` inside the same transaction.
    after: Option<fn(&Connection) -> DbResult<()>>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_init.sql"),
        after: Some(add_missing_owner_columns),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_scope_indexes.sql"),
        after: None,
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        if let Some(after) = migration.after {
            after(&tx)?;
        }
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        debug!(
            "event=db_migrate module=db status=ok version={}",
            migration.version
        );
    }
    tx.commit()?;

    Ok(())
}

/// `CREATE TABLE IF NOT EXISTS` leaves pre-existing tables untouched, so
/// tables from the unversioned schema get their `owner` column here.
fn add_missing_owner_columns(conn: &Connection) -> DbResult<()> {
    for table in OWNED_TABLES {
        let has_owner: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM pragma_table_info(?1) WHERE name = 'owner');",
            [table],
            |row| row.get(0),
        )?;
        if has_owner {
            continue;
        }
        conn.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN owner TEXT;"))?;
        debug!(
            "event=db_migrate module=db status=ok table={} action=add_owner_column",
            table
        );
    }
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

//! Schema migrations.
//!
//! Migration scripts are embedded in the binary. The schema version lives in
//! SQLite's `user_version` header field; a migration and the version bump
//! commit in one transaction.

use rusqlite::{Connection, Result};

/// Ordered migration scripts. Script `i` upgrades the schema to version `i + 1`.
const MIGRATIONS: &[(&str, &str)] = &[("initial", include_str!("001_initial.sql"))];

/// Schema version of the database behind `conn`; 0 for a fresh database.
pub fn current_version(conn: &Connection) -> Result<usize> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Schema version after all embedded migrations are applied.
pub fn latest_version() -> usize {
    MIGRATIONS.len()
}

/// Apply every migration newer than the current schema version.
///
/// Returns the number of migrations applied.
pub fn run_migrations(conn: &Connection) -> Result<usize> {
    let current = current_version(conn)?;
    if current >= latest_version() {
        tracing::debug!("Database schema is up to date (version {})", current);
        return Ok(0);
    }

    for (index, (name, sql)) in MIGRATIONS.iter().enumerate().skip(current) {
        let version = index + 1;
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;

        tracing::info!("Applied migration {}: {}", version, name);
    }

    Ok(latest_version() - current)
}

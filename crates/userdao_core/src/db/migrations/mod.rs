//! Schema steps for the `users` store.
//!
//! Step 1 creates `users`: a text `id` primary key, three required text
//! columns, `level` stored as its integer value and non-negative `login`
//! and `recommend` counters. The highest applied step number is kept in
//! `PRAGMA user_version`. A database stamped above [`latest_version`] is
//! refused instead of being opened with an unknown layout.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "users",
    sql: include_str!("0001_users.sql"),
}];

/// Highest schema step this build can apply.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.iter().map(|step| step.version).max().unwrap_or(0)
}

/// Brings the schema up to [`latest_version`].
///
/// All pending steps share one transaction, so a failing step leaves the
/// stored version untouched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let stored: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let latest = latest_version();
    if stored > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: stored,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > stored)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    for step in pending {
        info!(
            "event=schema_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    Ok(())
}

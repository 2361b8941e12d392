//! Scoped connection access for DAO implementations.
//!
//! # Invariants
//! - At most one DAO statement holds the connection at a time.
//! - The connection is released when the returned guard drops, on every path.

use super::{open_db, open_db_in_memory, DbResult};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use std::path::Path;

/// Product name used to pick the SQLite error-code table.
pub const SQLITE_PRODUCT_NAME: &str = "SQLite";

/// Owns a migrated connection and lends it out one call at a time.
pub struct DataSource {
    conn: Mutex<Connection>,
}

impl DataSource {
    /// Opens (or creates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Name of the backend product, used for error-code table lookup.
    pub fn database_product_name(&self) -> &'static str {
        SQLITE_PRODUCT_NAME
    }

    /// Acquires the connection for the duration of the returned guard.
    pub fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}

//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the user store.
//! - Apply schema migrations in deterministic order.
//! - Hand out scoped connection access through [`DataSource`].
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No DAO reads or writes happen before migrations succeed.

pub mod migrations;
mod open;
mod source;

pub use open::{open_db, open_db_in_memory};
pub use source::{DataSource, SQLITE_PRODUCT_NAME};

pub type DbResult<T> = Result<T, DbError>;

/// Connection bootstrap failure.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

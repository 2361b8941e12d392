//! Semantic data-access errors returned across the DAO boundary.
//!
//! # Invariants
//! - Backend failures reach callers only through these variants.
//! - `DuplicateKey` and `Access` keep the native backend error as `source`.
//! - Display text is a single line and does not repeat the `source` text.

use thiserror::Error;

pub type DaoResult<T> = Result<T, DataAccessError>;

/// Normalized failure of a DAO operation.
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// A uniqueness constraint rejected the write.
    #[error("{task}; SQL [{sql}]; duplicate key")]
    DuplicateKey {
        task: String,
        sql: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A statement expected rows but found or affected none.
    #[error("{task}; incorrect result size: expected {expected}, actual 0")]
    EmptyResult { task: String, expected: usize },
    /// Any other backend failure.
    #[error("{task}; SQL [{sql}]; data access failure")]
    Access {
        task: String,
        sql: String,
        #[source]
        source: rusqlite::Error,
    },
    /// The implementation does not support this operation.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

impl DataAccessError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }

    /// Expected row count carried by `EmptyResult`.
    pub fn expected_size(&self) -> Option<usize> {
        match self {
            Self::EmptyResult { expected, .. } => Some(*expected),
            _ => None,
        }
    }

    /// Stable kind name used in log events.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => "duplicate_key",
            Self::EmptyResult { .. } => "empty_result",
            Self::Access { .. } => "access",
            Self::UnsupportedOperation(_) => "unsupported_operation",
        }
    }

    /// Extended vendor code of the backend cause, if any.
    pub fn vendor_code(&self) -> Option<i32> {
        self.backend_cause()
            .and_then(rusqlite::Error::sqlite_error)
            .map(|native| native.extended_code)
    }

    /// Native backend error, when the failure came from the backend.
    pub fn backend_cause(&self) -> Option<&rusqlite::Error> {
        match self {
            Self::DuplicateKey { source, .. } | Self::Access { source, .. } => Some(source),
            Self::EmptyResult { .. } | Self::UnsupportedOperation(_) => None,
        }
    }
}

/// Collapses whitespace runs so multi-line SQL renders on one line.
pub(crate) fn single_line_sql(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

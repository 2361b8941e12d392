//! Translation of backend-native failures into [`DataAccessError`].
//!
//! # Responsibility
//! - Map vendor error codes to semantic kinds using a per-product table.
//! - Keep code tables as data so a backend swap only swaps the table.
//!
//! # Invariants
//! - Every translated error keeps the original backend error when one exists.
//! - Codes not listed in the table translate to `Access`.

use crate::dao::error::{single_line_sql, DataAccessError};
use crate::db::DataSource;
use log::{debug, error, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

const BUILTIN_SQL_ERROR_CODES: &str = include_str!("sql_error_codes.json");

/// Converts a native backend failure into a semantic data-access error.
pub trait SqlExceptionTranslator {
    /// `task` names the operation, `sql` the statement that failed (if any).
    fn translate(&self, task: &str, sql: Option<&str>, err: rusqlite::Error) -> DataAccessError;

    /// Maps a write that affected no rows while `expected` were required.
    fn no_rows_affected(&self, task: &str, _sql: Option<&str>, expected: usize) -> DataAccessError {
        debug!("event=sql_translate module=dao task={task} kind=EmptyResult code=none");
        DataAccessError::EmptyResult {
            task: task.to_string(),
            expected,
        }
    }
}

/// Semantic kind a vendor code resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DuplicateKey,
    EmptyResult,
    Access,
}

/// Vendor error codes for one database product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SqlErrorCodes {
    #[serde(default)]
    pub duplicate_key_codes: BTreeSet<i32>,
}

impl SqlErrorCodes {
    /// Resolves one vendor code.
    pub fn kind_for(&self, code: i32) -> ErrorKind {
        if self.duplicate_key_codes.contains(&code) {
            ErrorKind::DuplicateKey
        } else {
            ErrorKind::Access
        }
    }
}

/// Failure to load an error-code document.
#[derive(Debug, thiserror::Error)]
pub enum SqlErrorCodesError {
    #[error("failed to read error code file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid error code document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error-code tables keyed by database product name.
#[derive(Debug, Clone, Default)]
pub struct SqlErrorCodesRegistry {
    by_product: BTreeMap<String, SqlErrorCodes>,
}

impl SqlErrorCodesRegistry {
    /// Registry built from the document shipped with this crate.
    ///
    /// # Errors
    /// - `Parse` when the embedded document is malformed.
    pub fn builtin() -> Result<Self, SqlErrorCodesError> {
        Self::from_json_str(BUILTIN_SQL_ERROR_CODES).map_err(|err| {
            error!("event=error_codes_load module=dao status=error source=builtin error={err}");
            err
        })
    }

    /// Parses a JSON object of `{ "<product>": { "duplicate_key_codes": [..] } }`.
    pub fn from_json_str(json: &str) -> Result<Self, SqlErrorCodesError> {
        let raw: BTreeMap<String, SqlErrorCodes> = serde_json::from_str(json)?;
        let by_product = raw
            .into_iter()
            .map(|(product, codes)| (product.to_ascii_lowercase(), codes))
            .collect();
        Ok(Self { by_product })
    }

    /// Reads and parses an error-code document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SqlErrorCodesError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SqlErrorCodesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Table for `product`, matched case-insensitively.
    pub fn codes_for(&self, product: &str) -> Option<&SqlErrorCodes> {
        self.by_product.get(&product.to_ascii_lowercase())
    }
}

/// Translator driven by a [`SqlErrorCodes`] table.
#[derive(Debug, Clone, Default)]
pub struct SqlErrorCodeTranslator {
    codes: SqlErrorCodes,
}

impl SqlErrorCodeTranslator {
    pub fn new(codes: SqlErrorCodes) -> Self {
        Self { codes }
    }

    /// Picks the built-in table for `product`. Unknown products get an empty table.
    pub fn for_product(product: &str) -> Result<Self, SqlErrorCodesError> {
        let codes = SqlErrorCodesRegistry::builtin()?
            .codes_for(product)
            .cloned()
            .unwrap_or_else(|| {
                warn!("event=error_codes_lookup module=dao status=miss product={product}");
                SqlErrorCodes::default()
            });
        Ok(Self::new(codes))
    }

    /// Picks the built-in table matching the data source's product.
    pub fn for_data_source(source: &DataSource) -> Result<Self, SqlErrorCodesError> {
        Self::for_product(source.database_product_name())
    }

    pub fn codes(&self) -> &SqlErrorCodes {
        &self.codes
    }

    fn classify(&self, err: &rusqlite::Error) -> (ErrorKind, Option<i32>) {
        match err {
            rusqlite::Error::QueryReturnedNoRows => (ErrorKind::EmptyResult, None),
            rusqlite::Error::SqliteFailure(native, _) => {
                (self.codes.kind_for(native.extended_code), Some(native.extended_code))
            }
            _ => (ErrorKind::Access, None),
        }
    }
}

impl SqlExceptionTranslator for SqlErrorCodeTranslator {
    fn translate(&self, task: &str, sql: Option<&str>, err: rusqlite::Error) -> DataAccessError {
        let (kind, code) = self.classify(&err);
        debug!(
            "event=sql_translate module=dao task={task} kind={kind:?} code={}",
            code.map_or_else(|| "none".to_string(), |code| code.to_string())
        );

        let task = task.to_string();
        let sql = single_line_sql(sql.unwrap_or_default());
        match kind {
            ErrorKind::DuplicateKey => DataAccessError::DuplicateKey {
                task,
                sql,
                source: err,
            },
            ErrorKind::EmptyResult => DataAccessError::EmptyResult { task, expected: 1 },
            ErrorKind::Access => DataAccessError::Access {
                task,
                sql,
                source: err,
            },
        }
    }
}

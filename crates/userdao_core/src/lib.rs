//! User data-access layer over SQLite.
//! Backend failures are normalized into `DataAccessError` before reaching callers.

pub mod dao;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;

pub use dao::error::{DaoResult, DataAccessError};
pub use dao::mock::MockUserDao;
pub use dao::translator::{
    ErrorKind, SqlErrorCodeTranslator, SqlErrorCodes, SqlErrorCodesError, SqlErrorCodesRegistry,
    SqlExceptionTranslator,
};
pub use dao::user_dao::{SqliteUserDao, UserDao};
pub use db::{DataSource, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings};
pub use model::user::{Level, User};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

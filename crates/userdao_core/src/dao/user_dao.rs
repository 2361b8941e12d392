//! User DAO contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the CRUD operations over `users` storage.
//! - Keep SQL and native backend errors inside the DAO boundary.
//!
//! # Invariants
//! - Each operation runs exactly one statement on a scoped connection.
//! - Every statement failure passes through the configured translator.
//! - `get_all` orders rows by ascending `id`.

use crate::dao::error::{DaoResult, DataAccessError};
use crate::dao::translator::{SqlErrorCodeTranslator, SqlErrorCodesError, SqlExceptionTranslator};
use crate::db::DataSource;
use crate::model::user::User;
use log::{debug, warn};
use rusqlite::{params, Row};

const INSERT_USER_SQL: &str = "INSERT INTO users (
    id,
    name,
    password,
    email,
    level,
    login,
    recommend
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);";

const SELECT_USER_SQL: &str = "SELECT
    id,
    name,
    password,
    email,
    level,
    login,
    recommend
FROM users
WHERE id = ?1;";

const SELECT_ALL_USERS_SQL: &str = "SELECT
    id,
    name,
    password,
    email,
    level,
    login,
    recommend
FROM users
ORDER BY id ASC;";

const UPDATE_USER_SQL: &str = "UPDATE users
SET
    name = ?1,
    password = ?2,
    email = ?3,
    level = ?4,
    login = ?5,
    recommend = ?6
WHERE id = ?7;";

const DELETE_ALL_USERS_SQL: &str = "DELETE FROM users;";

const COUNT_USERS_SQL: &str = "SELECT COUNT(*) FROM users;";

/// Data access contract for user records.
pub trait UserDao {
    /// Inserts a new user. Fails with `DuplicateKey` when the id exists.
    fn add(&self, user: &User) -> DaoResult<()>;
    /// Loads one user. Fails with `EmptyResult` (expected 1) when absent.
    fn get(&self, id: &str) -> DaoResult<User>;
    /// Loads every user ordered by ascending id.
    fn get_all(&self) -> DaoResult<Vec<User>>;
    /// Replaces all non-id fields of the user with the same id.
    ///
    /// A missing id fails with `EmptyResult` (expected 1). The SQLite
    /// implementation obtains that error from its translator's
    /// `no_rows_affected` hook.
    fn update(&self, user: &User) -> DaoResult<()>;
    /// Removes every user.
    fn delete_all(&self) -> DaoResult<()>;
    /// Number of stored users.
    fn get_count(&self) -> DaoResult<usize>;
}

/// SQLite-backed user DAO.
pub struct SqliteUserDao<'ds, T = SqlErrorCodeTranslator> {
    data_source: &'ds DataSource,
    translator: T,
}

impl<'ds> SqliteUserDao<'ds> {
    /// Uses the built-in error-code table for the data source's product.
    pub fn try_new(data_source: &'ds DataSource) -> Result<Self, SqlErrorCodesError> {
        let translator = SqlErrorCodeTranslator::for_data_source(data_source)?;
        Ok(Self::with_translator(data_source, translator))
    }
}

impl<'ds, T: SqlExceptionTranslator> SqliteUserDao<'ds, T> {
    pub fn with_translator(data_source: &'ds DataSource, translator: T) -> Self {
        Self {
            data_source,
            translator,
        }
    }

    fn translate(&self, task: &'static str, sql: &str, err: rusqlite::Error) -> DataAccessError {
        let translated = self.translator.translate(task, Some(sql), err);
        warn!("{}", failure_event(task, &translated));
        translated
    }
}

impl<T: SqlExceptionTranslator> UserDao for SqliteUserDao<'_, T> {
    fn add(&self, user: &User) -> DaoResult<()> {
        let conn = self.data_source.connection();
        conn.execute(
            INSERT_USER_SQL,
            params![
                user.id.as_str(),
                user.name.as_str(),
                user.password.as_str(),
                user.email.as_str(),
                user.level,
                user.login,
                user.recommend,
            ],
        )
        .map_err(|err| self.translate("add", INSERT_USER_SQL, err))?;

        debug!("event=dao_call module=dao op=add status=ok");
        Ok(())
    }

    fn get(&self, id: &str) -> DaoResult<User> {
        let conn = self.data_source.connection();
        conn.query_row(SELECT_USER_SQL, [id], parse_user_row)
            .map_err(|err| self.translate("get", SELECT_USER_SQL, err))
    }

    fn get_all(&self) -> DaoResult<Vec<User>> {
        let conn = self.data_source.connection();
        let load = || -> rusqlite::Result<Vec<User>> {
            let mut stmt = conn.prepare(SELECT_ALL_USERS_SQL)?;
            let users = stmt
                .query_map([], parse_user_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(users)
        };

        let users = load().map_err(|err| self.translate("get_all", SELECT_ALL_USERS_SQL, err))?;
        debug!(
            "event=dao_call module=dao op=get_all status=ok rows={}",
            users.len()
        );
        Ok(users)
    }

    fn update(&self, user: &User) -> DaoResult<()> {
        let conn = self.data_source.connection();
        let changed = conn
            .execute(
                UPDATE_USER_SQL,
                params![
                    user.name.as_str(),
                    user.password.as_str(),
                    user.email.as_str(),
                    user.level,
                    user.login,
                    user.recommend,
                    user.id.as_str(),
                ],
            )
            .map_err(|err| self.translate("update", UPDATE_USER_SQL, err))?;

        if changed == 0 {
            let err = self
                .translator
                .no_rows_affected("update", Some(UPDATE_USER_SQL), 1);
            warn!("{}", failure_event("update", &err));
            return Err(err);
        }

        Ok(())
    }

    fn delete_all(&self) -> DaoResult<()> {
        let conn = self.data_source.connection();
        let removed = conn
            .execute(DELETE_ALL_USERS_SQL, [])
            .map_err(|err| self.translate("delete_all", DELETE_ALL_USERS_SQL, err))?;

        debug!("event=dao_call module=dao op=delete_all status=ok rows={removed}");
        Ok(())
    }

    fn get_count(&self) -> DaoResult<usize> {
        let conn = self.data_source.connection();
        conn.query_row(COUNT_USERS_SQL, [], |row| {
            let count = row.get::<_, i64>(0)?;
            usize::try_from(count).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, count))
        })
        .map_err(|err| self.translate("get_count", COUNT_USERS_SQL, err))
    }
}

/// Single-line `dao_call` failure record: kind and vendor code, no SQL text.
fn failure_event(task: &str, err: &DataAccessError) -> String {
    let code = err
        .vendor_code()
        .map_or_else(|| "none".to_string(), |code| code.to_string());
    format!(
        "event=dao_call module=dao op={task} status=error kind={} code={code}",
        err.kind_label()
    )
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        password: row.get("password")?,
        email: row.get("email")?,
        level: row.get("level")?,
        login: row.get("login")?,
        recommend: row.get("recommend")?,
    })
}

//! User domain model.
//!
//! # Responsibility
//! - Define the record persisted in the `users` table.
//! - Own the membership level ladder and its stored integer values.
//!
//! # Invariants
//! - `id` is the identity and never changes after creation.
//! - `Level` values are stable on disk: basic=1, silver=2, gold=3.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Membership level, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Basic,
    Silver,
    Gold,
}

impl Level {
    /// Integer stored in `users.level`.
    pub fn value(self) -> i64 {
        match self {
            Self::Basic => 1,
            Self::Silver => 2,
            Self::Gold => 3,
        }
    }

    /// Parses a stored level value. Returns `None` for unknown values.
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Basic),
            2 => Some(Self::Silver),
            3 => Some(Self::Gold),
            _ => None,
        }
    }

    /// Next rung on the ladder; `None` once the top is reached.
    pub fn next_level(self) -> Option<Self> {
        match self {
            Self::Basic => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => None,
        }
    }
}

impl ToSql for Level {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.value()))
    }
}

impl FromSql for Level {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_i64()?;
        Self::from_value(raw).ok_or(FromSqlError::OutOfRange(raw))
    }
}

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique login id; primary key in storage.
    pub id: String,
    pub name: String,
    /// Opaque secret, stored as given.
    pub password: String,
    pub email: String,
    pub level: Level,
    /// Number of logins recorded for this user.
    pub login: u32,
    /// Number of recommendations received.
    pub recommend: u32,
}

impl User {
    /// Builds a user from all of its fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        level: Level,
        login: u32,
        recommend: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            password: password.into(),
            email: email.into(),
            level,
            login,
            recommend,
        }
    }

    /// Moves this user one level up. Returns `false` when already at the top.
    pub fn upgrade_level(&mut self) -> bool {
        match self.level.next_level() {
            Some(next) => {
                self.level = next;
                true
            }
            None => false,
        }
    }
}

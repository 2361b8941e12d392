//! User use-case service.
//!
//! # Responsibility
//! - Run the level-upgrade batch policy over all users.
//! - Provide insert-or-ignore on top of `DuplicateKey`.
//!
//! # Invariants
//! - The service stays storage-agnostic and only talks to `UserDao`.
//! - Upgraded users are written back in `get_all` order.

use crate::dao::error::DaoResult;
use crate::dao::user_dao::UserDao;
use crate::model::user::{Level, User};
use log::info;

/// Logins a basic user needs before moving to silver.
pub const MIN_LOGCOUNT_FOR_SILVER: u32 = 50;
/// Recommendations a silver user needs before moving to gold.
pub const MIN_RECOMMEND_FOR_GOLD: u32 = 30;

/// Use-case service wrapper around a user DAO.
pub struct UserService<D: UserDao> {
    dao: D,
}

impl<D: UserDao> UserService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    /// Borrow the underlying DAO.
    pub fn dao(&self) -> &D {
        &self.dao
    }

    /// Inserts a user; `DuplicateKey` and other failures pass through unchanged.
    pub fn add(&self, user: &User) -> DaoResult<()> {
        self.dao.add(user)
    }

    /// Inserts a user unless the id is taken.
    ///
    /// Returns `Ok(true)` when inserted and `Ok(false)` when the id already existed.
    pub fn add_if_absent(&self, user: &User) -> DaoResult<bool> {
        match self.dao.add(user) {
            Ok(()) => Ok(true),
            Err(err) if err.is_duplicate_key() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Upgrades every eligible user by one level and returns how many changed.
    pub fn upgrade_levels(&self) -> DaoResult<usize> {
        let mut upgraded = 0;
        for mut user in self.dao.get_all()? {
            if can_upgrade_level(&user) && user.upgrade_level() {
                self.dao.update(&user)?;
                upgraded += 1;
            }
        }

        info!("event=upgrade_levels module=service status=ok upgraded={upgraded}");
        Ok(upgraded)
    }
}

/// Whether `user` meets the threshold for its current level.
pub fn can_upgrade_level(user: &User) -> bool {
    match user.level {
        Level::Basic => user.login >= MIN_LOGCOUNT_FOR_SILVER,
        Level::Silver => user.recommend >= MIN_RECOMMEND_FOR_GOLD,
        Level::Gold => false,
    }
}

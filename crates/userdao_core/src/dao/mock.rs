//! In-memory [`UserDao`] double for policy tests.
//!
//! Serves a fixed user list from `get_all` and records `update` calls
//! without applying them. Every other operation fails loudly.

use crate::dao::error::{DaoResult, DataAccessError};
use crate::dao::user_dao::UserDao;
use crate::model::user::User;
use std::cell::RefCell;

/// Recording test double.
#[derive(Debug, Default)]
pub struct MockUserDao {
    users: Vec<User>,
    updated: RefCell<Vec<User>>,
}

impl MockUserDao {
    /// `users` is returned verbatim, in the given order, by `get_all`.
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            updated: RefCell::new(Vec::new()),
        }
    }

    /// Users passed to `update`, in call order.
    pub fn updated(&self) -> Vec<User> {
        self.updated.borrow().clone()
    }
}

impl UserDao for MockUserDao {
    fn add(&self, _user: &User) -> DaoResult<()> {
        Err(DataAccessError::UnsupportedOperation("add"))
    }

    fn get(&self, _id: &str) -> DaoResult<User> {
        Err(DataAccessError::UnsupportedOperation("get"))
    }

    fn get_all(&self) -> DaoResult<Vec<User>> {
        Ok(self.users.clone())
    }

    fn update(&self, user: &User) -> DaoResult<()> {
        self.updated.borrow_mut().push(user.clone());
        Ok(())
    }

    fn delete_all(&self) -> DaoResult<()> {
        Err(DataAccessError::UnsupportedOperation("delete_all"))
    }

    fn get_count(&self) -> DaoResult<usize> {
        Err(DataAccessError::UnsupportedOperation("get_count"))
    }
}

//! Data access layer for user records.
//!
//! # Responsibility
//! - Define the `UserDao` contract shared by storage backends and doubles.
//! - Normalize backend failures into `DataAccessError` before they escape.
//!
//! # Invariants
//! - No native `rusqlite::Error` crosses this module's public API except as
//!   the `source` of a translated error.

pub mod error;
pub mod mock;
pub mod translator;
pub mod user_dao;

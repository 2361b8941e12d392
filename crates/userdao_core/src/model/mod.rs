//! Domain records handled by the data-access layer.
//!
//! # Invariants
//! - Every stored record is identified by a caller-chosen string id.

pub mod user;

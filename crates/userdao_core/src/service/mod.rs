//! Use-case services built on DAO contracts.

pub mod user_service;

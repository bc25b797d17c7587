//! mg-db - Database abstraction layer for Migrate
//!
//! This crate provides the `Database` trait, the single capability the
//! migration engine needs from a database, and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;

//! mg-core - Core library for Migrate
//!
//! This crate provides the configuration model, migration file discovery
//! and ordering, content checksums, and the lock ledger that records which
//! migrations have already been applied.

pub mod checksum;
pub mod config;
pub mod discovery;
pub mod error;
pub mod lock;

pub use checksum::{checksum_file, compute_checksum};
pub use config::Config;
pub use discovery::{compare_migration_names, discover, Location};
pub use error::{CoreError, CoreResult};
pub use lock::{AppliedMigration, Lock, Timestamp};

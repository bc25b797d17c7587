//! mg-runner - Migration engine for Migrate
//!
//! This crate applies pending migration files against a [`mg_db::Database`],
//! records each success in the lock ledger, and computes the pending plan
//! used by `mg status`.

pub mod error;
pub mod migrator;
pub mod plan;
pub mod summary;

pub use error::{ApplyError, RunnerError, RunnerResult};
pub use migrator::{apply, Migrator};
pub use plan::{plan, MigrationState, PlannedMigration};
pub use summary::format_results;

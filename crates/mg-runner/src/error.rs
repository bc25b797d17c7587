//! Error types for mg-runner

use mg_core::{AppliedMigration, CoreError};
use mg_db::DbError;
use thiserror::Error;

/// Reasons a migration run stops
#[derive(Error, Debug)]
pub enum RunnerError {
    /// R001: Lock file could not be read or parsed
    #[error("[R001] Failed to load lock file: {0}")]
    LockLoad(#[source] CoreError),

    /// R002: A location could not be listed or expanded
    #[error("[R002] Failed to discover migrations in {location}: {source}")]
    Discovery { location: String, source: CoreError },

    /// R003: Checksum of a migration file could not be computed
    #[error("[R003] Error calculating checksum for migration file {path}: {source}")]
    Checksum {
        path: String,
        source: std::io::Error,
    },

    /// R004: Migration file could not be read
    #[error("[R004] Error reading migration file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// R005: Database rejected the migration
    #[error("[R005] Error executing migration file {path}: {source}")]
    Execution { path: String, source: DbError },

    /// R006: Migrations ran but the ledger could not be written
    #[error(
        "[R006] Migrations were applied but lock file {path} could not be written: {source}. \
         The database and the lock file no longer agree; inspect both by hand before running again"
    )]
    LedgerNotPersisted { path: String, source: CoreError },
}

impl RunnerError {
    /// True when the database was changed but the ledger does not say so
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, RunnerError::LedgerNotPersisted { .. })
    }

    /// Migration file the error is about, if any
    pub fn filepath(&self) -> Option<&str> {
        match self {
            RunnerError::Checksum { path, .. }
            | RunnerError::Read { path, .. }
            | RunnerError::Execution { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for RunnerError
pub type RunnerResult<T> = Result<T, RunnerError>;

/// A run that stopped early, with the migrations it applied before stopping
#[derive(Error, Debug)]
#[error("migration run stopped after applying {} file(s)", .applied.len())]
pub struct ApplyError {
    /// Migrations applied and recorded before the failure
    pub applied: Vec<AppliedMigration>,

    /// What stopped the run
    #[source]
    pub source: RunnerError,
}

impl ApplyError {
    pub(crate) fn new(applied: Vec<AppliedMigration>, source: RunnerError) -> Self {
        Self { applied, source }
    }

    pub fn is_unrecoverable(&self) -> bool {
        self.source.is_unrecoverable()
    }
}

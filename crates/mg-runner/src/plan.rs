//! Pending plan: which discovered migrations are applied and which would run
//!
//! Computed from the lock file and the filesystem only; the database is
//! never consulted.

use crate::error::{RunnerError, RunnerResult};
use crate::migrator::discover_location;
use mg_core::{AppliedMigration, Config, Lock};
use std::collections::HashSet;

/// Whether a discovered migration has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationState {
    /// Recorded in the lock file
    Applied(AppliedMigration),
    /// Would be executed by the next apply
    Pending,
}

/// A discovered migration file and its state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMigration {
    /// Path of the migration file, as it would be recorded
    pub filepath: String,

    /// Applied or pending
    pub state: MigrationState,
}

impl PlannedMigration {
    pub fn is_pending(&self) -> bool {
        matches!(self.state, MigrationState::Pending)
    }
}

/// List every discovered migration in apply order with its state.
///
/// A file reachable from several locations is listed once, at its first
/// position, matching what apply would do.
pub fn plan(config: &Config) -> RunnerResult<Vec<PlannedMigration>> {
    let lock = Lock::load(&config.lock_file).map_err(RunnerError::LockLoad)?;

    let mut seen = HashSet::new();
    let mut planned = Vec::new();
    for location in &config.paths {
        for path in discover_location(location, config)? {
            let filepath = path.to_string_lossy().into_owned();
            if !seen.insert(filepath.clone()) {
                continue;
            }

            let state = match lock.get(&filepath) {
                Some(record) => MigrationState::Applied(record.clone()),
                None => MigrationState::Pending,
            };
            planned.push(PlannedMigration { filepath, state });
        }
    }
    Ok(planned)
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;

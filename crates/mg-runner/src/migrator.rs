//! Sequential apply-and-record loop

use crate::error::{ApplyError, RunnerError, RunnerResult};
use mg_core::{checksum_file, discover, AppliedMigration, Config, Location, Lock};
use mg_db::Database;
use std::path::{Path, PathBuf};

/// Applies pending migrations from a configuration to one database
pub struct Migrator<'a> {
    db: &'a dyn Database,
    config: &'a Config,
}

impl<'a> Migrator<'a> {
    /// Create a new migrator
    pub fn new(db: &'a dyn Database, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Apply every migration not yet recorded in the lock file.
    ///
    /// Locations are processed in configured order and files in discovered
    /// order. The first failure stops the whole run; migrations applied
    /// before it are still recorded and returned inside the [`ApplyError`].
    /// The lock file is written once at the end, and only if something new
    /// was applied.
    pub fn apply(&self) -> Result<Vec<AppliedMigration>, ApplyError> {
        let mut lock = Lock::load(&self.config.lock_file)
            .map_err(|e| ApplyError::new(Vec::new(), RunnerError::LockLoad(e)))?;

        let mut applied = Vec::new();
        let outcome = self.apply_pending(&mut lock, &mut applied);

        if !applied.is_empty() {
            if let Err(e) = lock.save(&self.config.lock_file) {
                if let Err(run_err) = &outcome {
                    log::error!("Run had already stopped before the lock write failed: {run_err}");
                }
                return Err(ApplyError::new(
                    applied,
                    RunnerError::LedgerNotPersisted {
                        path: self.config.lock_file.display().to_string(),
                        source: e,
                    },
                ));
            }
        }

        match outcome {
            Ok(()) => Ok(applied),
            Err(e) => Err(ApplyError::new(applied, e)),
        }
    }

    fn apply_pending(
        &self,
        lock: &mut Lock,
        applied: &mut Vec<AppliedMigration>,
    ) -> RunnerResult<()> {
        for location in &self.config.paths {
            for path in discover_location(location, self.config)? {
                let filepath = path.to_string_lossy().into_owned();
                if lock.contains(&filepath) {
                    log::debug!("Skipping {filepath}: already applied");
                    continue;
                }

                let migration = self.apply_file(&path, filepath)?;
                log::info!("Applied {}", migration.filepath);
                lock.record(migration.clone());
                applied.push(migration);
            }
        }
        Ok(())
    }

    fn apply_file(&self, path: &Path, filepath: String) -> RunnerResult<AppliedMigration> {
        let checksum = checksum_file(path).map_err(|e| RunnerError::Checksum {
            path: filepath.clone(),
            source: e,
        })?;
        let bytes = std::fs::read(path).map_err(|e| RunnerError::Read {
            path: filepath.clone(),
            source: e,
        })?;
        let sql = match String::from_utf8(bytes) {
            Ok(sql) => sql,
            Err(e) => {
                log::warn!("{filepath} is not valid UTF-8, invalid bytes are replaced");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        log::debug!("Executing {filepath} on {}", self.db.db_type());
        self.db
            .execute_batch(&sql)
            .map_err(|e| RunnerError::Execution {
                path: filepath.clone(),
                source: e,
            })?;

        Ok(AppliedMigration::new(filepath, checksum))
    }
}

/// Discover the files of one configured location, in apply order
pub(crate) fn discover_location(location: &str, config: &Config) -> RunnerResult<Vec<PathBuf>> {
    discover(&Location::parse(location), config).map_err(|e| RunnerError::Discovery {
        location: location.to_string(),
        source: e,
    })
}

/// Apply all pending migrations of `config` to `db`
pub fn apply(db: &dyn Database, config: &Config) -> Result<Vec<AppliedMigration>, ApplyError> {
    Migrator::new(db, config).apply()
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;

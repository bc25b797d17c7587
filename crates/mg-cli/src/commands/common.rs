//! Shared helpers for CLI commands

use anyhow::{Context, Result};
use mg_core::Config;
use mg_db::DuckDbBackend;
use std::fmt;

use crate::cli::GlobalArgs;

/// Exit code for a run that failed but left the lock file consistent
pub(crate) const EXIT_FAILURE: u8 = 1;

/// Exit code for a run whose applied migrations could not be recorded
pub(crate) const EXIT_UNRECOVERABLE: u8 = 3;

/// Error type representing a non-zero process exit code.
///
/// Commands that already reported their failure return
/// `Err(ExitCode(N).into())` so `main` can exit without printing again.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; never shown to the user.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the configuration named by `--config`
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let config = Config::load(&global.config).with_context(|| {
        format!(
            "Failed to load configuration file {}",
            global.config.display()
        )
    })?;
    log::debug!(
        "Loaded {} location(s), lock file {}",
        config.paths.len(),
        config.lock_file.display()
    );
    Ok(config)
}

/// Open the DuckDB database named by `--database`
pub(crate) fn open_database(global: &GlobalArgs) -> Result<DuckDbBackend> {
    DuckDbBackend::new(&global.database)
        .with_context(|| format!("Failed to connect to database {}", global.database))
}

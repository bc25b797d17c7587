//! Init command implementation

use anyhow::{bail, Context, Result};
use mg_core::config::defaults::{DEFAULT_FILE_EXTENSIONS, DEFAULT_LOCK_FILE};
use std::fs;
use std::path::Path;

use crate::cli::{GlobalArgs, InitArgs};

/// Directory created next to the config for new migrations
const MIGRATIONS_DIR: &str = "migrations";

/// Execute the init command
pub(crate) fn execute(args: &InitArgs, global: &GlobalArgs) -> Result<()> {
    let config_path = &global.config;
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let base_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let migrations_dir = base_dir.join(MIGRATIONS_DIR);
    fs::create_dir_all(&migrations_dir)
        .with_context(|| format!("Failed to create {}", migrations_dir.display()))?;

    let starter = serde_json::json!({
        "paths": [MIGRATIONS_DIR],
        "file_extensions": DEFAULT_FILE_EXTENSIONS,
        "lock_file": DEFAULT_LOCK_FILE,
    });
    let mut content = serde_json::to_string_pretty(&starter)?;
    content.push('\n');
    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    println!("Add migrations to {}", migrations_dir.display());
    Ok(())
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;

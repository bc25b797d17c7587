//! Status command implementation

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use mg_runner::{plan, MigrationState, PlannedMigration};
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::commands::common::load_config;

/// One row of the status report
#[derive(Debug, Serialize, PartialEq)]
struct StatusEntry {
    filepath: String,
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum: Option<String>,
}

impl From<&PlannedMigration> for StatusEntry {
    fn from(planned: &PlannedMigration) -> Self {
        match &planned.state {
            MigrationState::Applied(record) => Self {
                filepath: planned.filepath.clone(),
                state: "applied",
                applied_at: Some(
                    record
                        .applied_at
                        .to_utc()
                        .to_rfc3339_opts(SecondsFormat::Secs, true),
                ),
                checksum: Some(record.checksum.clone()),
            },
            MigrationState::Pending => Self {
                filepath: planned.filepath.clone(),
                state: "pending",
                applied_at: None,
                checksum: None,
            },
        }
    }
}

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let planned = plan(&config).context("Failed to compute migration status")?;

    let entries: Vec<StatusEntry> = planned
        .iter()
        .filter(|m| !args.pending || m.is_pending())
        .map(StatusEntry::from)
        .collect();

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => print!("{}", render_table(&entries)),
    }
    Ok(())
}

fn render_table(entries: &[StatusEntry]) -> String {
    if entries.is_empty() {
        return "No migrations found\n".to_string();
    }

    let mut out = format!("{:<8}  {:<20}  {}\n", "STATE", "APPLIED AT", "FILE");
    for entry in entries {
        out.push_str(&format!(
            "{:<8}  {:<20}  {}\n",
            entry.state,
            entry.applied_at.as_deref().unwrap_or("-"),
            entry.filepath
        ));
    }

    let pending = entries.iter().filter(|e| e.state == "pending").count();
    out.push_str(&format!(
        "\n{} applied, {} pending\n",
        entries.len() - pending,
        pending
    ));
    out
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;

//! Human-readable report of a migration run

use crate::error::RunnerError;
use chrono::SecondsFormat;
use mg_core::AppliedMigration;
use std::fmt::Write;

/// Render the migrations a run applied, followed by the error that stopped it.
pub fn format_results(applied: &[AppliedMigration], error: Option<&RunnerError>) -> String {
    let mut out = String::new();

    if applied.is_empty() {
        out.push_str("No new migrations applied\n");
    } else {
        let _ = writeln!(
            out,
            "Applied {} migration{}:",
            applied.len(),
            if applied.len() == 1 { "" } else { "s" }
        );
        for migration in applied {
            let _ = writeln!(
                out,
                "  {}  {}",
                migration
                    .applied_at
                    .to_utc()
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
                migration.filepath
            );
        }
    }

    if let Some(error) = error {
        let _ = writeln!(out, "\nError: {error}");
        if error.is_unrecoverable() {
            out.push_str(
                "Manual intervention required: the lock file does not reflect the database.\n",
            );
        }
    }

    out
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;

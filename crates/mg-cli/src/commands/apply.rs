//! Apply command implementation

use anyhow::Result;
use mg_core::AppliedMigration;
use mg_runner::{apply, format_results, RunnerError};
use serde::Serialize;

use crate::cli::{ApplyArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{
    load_config, open_database, ExitCode, EXIT_FAILURE, EXIT_UNRECOVERABLE,
};

/// JSON report of an apply run
#[derive(Debug, Serialize)]
struct ApplyReport<'a> {
    applied: &'a [AppliedMigration],
    error: Option<String>,
    unrecoverable: bool,
}

/// Execute the apply command
pub(crate) fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let db = open_database(global)?;

    match apply(&db, &config) {
        Ok(applied) => {
            report(args.output, &applied, None)?;
            Ok(())
        }
        Err(err) => {
            report(args.output, &err.applied, Some(&err.source))?;
            let code = if err.is_unrecoverable() {
                EXIT_UNRECOVERABLE
            } else {
                EXIT_FAILURE
            };
            Err(ExitCode(code).into())
        }
    }
}

fn report(
    output: OutputFormat,
    applied: &[AppliedMigration],
    error: Option<&RunnerError>,
) -> Result<()> {
    match output {
        OutputFormat::Text => {
            let text = format_results(applied, error);
            if error.is_some() {
                eprint!("{text}");
            } else {
                print!("{text}");
            }
        }
        OutputFormat::Json => {
            let report = ApplyReport {
                applied,
                error: error.map(ToString::to_string),
                unrecoverable: error.is_some_and(RunnerError::is_unrecoverable),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod tests;

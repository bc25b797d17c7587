use super::*;
use chrono::{TimeZone, Utc};
use mg_core::CoreError;
use mg_db::DbError;

fn applied(filepath: &str) -> AppliedMigration {
    AppliedMigration {
        filepath: filepath.to_string(),
        applied_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap().into(),
        checksum: "abc".to_string(),
    }
}

#[test]
fn test_format_nothing_applied() {
    assert_eq!(format_results(&[], None), "No new migrations applied\n");
}

#[test]
fn test_format_applied_list() {
    let out = format_results(&[applied("/m/01-a.sql"), applied("/m/02-b.sql")], None);

    assert_eq!(
        out,
        concat!(
            "Applied 2 migrations:\n",
            "  2024-03-01T12:30:00Z  /m/01-a.sql\n",
            "  2024-03-01T12:30:00Z  /m/02-b.sql\n",
        )
    );
}

#[test]
fn test_format_with_error() {
    let error = RunnerError::Execution {
        path: "/m/02-b.sql".to_string(),
        source: DbError::ExecutionError("syntax error".to_string()),
    };

    let out = format_results(&[applied("/m/01-a.sql")], Some(&error));

    assert!(out.starts_with("Applied 1 migration:\n"));
    assert!(out.contains("Error: [R005] Error executing migration file /m/02-b.sql"));
    assert!(!out.contains("Manual intervention"));
}

#[test]
fn test_format_unrecoverable_error() {
    let error = RunnerError::LedgerNotPersisted {
        path: "/m/.migrate.lock.json".to_string(),
        source: CoreError::ConfigInvalid {
            message: "disk full".to_string(),
        },
    };

    let out = format_results(&[applied("/m/01-a.sql")], Some(&error));

    assert!(out.contains("[R006]"));
    assert!(out.contains("Manual intervention required"));
}

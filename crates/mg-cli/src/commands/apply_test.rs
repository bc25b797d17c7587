use super::*;
use crate::cli::GlobalArgs;
use mg_core::Lock;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn global_for(config: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        config: config.to_path_buf(),
        database: ":memory:".to_string(),
    }
}

fn project(root: &Path, files: &[(&str, &str)]) -> std::path::PathBuf {
    let migrations = root.join("migrations");
    fs::create_dir_all(&migrations).unwrap();
    for (name, sql) in files {
        fs::write(migrations.join(name), sql).unwrap();
    }
    let config = root.join("migrate.json");
    fs::write(&config, r#"{ "paths": ["migrations"] }"#).unwrap();
    config
}

#[test]
fn test_apply_records_lock_file() {
    let temp = tempdir().unwrap();
    let config = project(
        temp.path(),
        &[
            ("01-create.sql", "CREATE TABLE t (id INTEGER);"),
            ("02-insert.sql", "INSERT INTO t VALUES (1);"),
        ],
    );
    let args = ApplyArgs {
        output: OutputFormat::Text,
    };

    execute(&args, &global_for(&config)).unwrap();

    let lock = Lock::load(&temp.path().join(".migrate.lock.json")).unwrap();
    assert_eq!(lock.len(), 2);
}

#[test]
fn test_apply_failure_returns_exit_code() {
    let temp = tempdir().unwrap();
    let config = project(
        temp.path(),
        &[
            ("01-create.sql", "CREATE TABLE t (id INTEGER);"),
            ("02-broken.sql", "INSERT INTO nowhere VALUES (1);"),
        ],
    );
    let args = ApplyArgs {
        output: OutputFormat::Json,
    };

    let err = execute(&args, &global_for(&config)).unwrap_err();

    let code = err.downcast_ref::<ExitCode>().unwrap();
    assert_eq!(code.0, EXIT_FAILURE);
    let lock = Lock::load(&temp.path().join(".migrate.lock.json")).unwrap();
    assert_eq!(lock.len(), 1);
}

#[test]
fn test_apply_missing_config() {
    let temp = tempdir().unwrap();
    let args = ApplyArgs {
        output: OutputFormat::Text,
    };

    let err = execute(&args, &global_for(&temp.path().join("migrate.json"))).unwrap_err();

    assert!(err.downcast_ref::<ExitCode>().is_none());
    assert!(format!("{err:#}").contains("[E001]"));
}

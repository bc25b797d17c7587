use super::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_files(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for name in names {
        fs::write(dir.join(name), format!("-- {name}")).unwrap();
    }
}

#[test]
fn test_plan_without_lock_is_all_pending() {
    let root = tempdir().unwrap();
    write_files(&root.path().join("m"), &["10-c.sql", "2-b.sql", "1-a.sql"]);
    let config = Config::new(root.path(), ["m"]);

    let planned = plan(&config).unwrap();

    assert_eq!(planned.len(), 3);
    assert!(planned.iter().all(PlannedMigration::is_pending));
    assert!(planned[0].filepath.ends_with("1-a.sql"));
    assert!(planned[2].filepath.ends_with("10-c.sql"));
}

#[test]
fn test_plan_marks_recorded_files_applied() {
    let root = tempdir().unwrap();
    let dir = root.path().join("m");
    write_files(&dir, &["01-a.sql", "02-b.sql"]);
    let config = Config::new(root.path(), ["m"]);

    let mut lock = Lock::default();
    let applied = AppliedMigration::new(dir.join("01-a.sql").to_string_lossy(), "abc");
    lock.record(applied.clone());
    lock.save(&config.lock_file).unwrap();

    let planned = plan(&config).unwrap();

    assert_eq!(planned[0].state, MigrationState::Applied(applied));
    assert_eq!(planned[1].state, MigrationState::Pending);
}

#[test]
fn test_plan_lists_duplicates_once() {
    let root = tempdir().unwrap();
    write_files(&root.path().join("m"), &["01-a.sql"]);
    let config = Config::new(root.path(), ["m", "m/*.sql"]);

    let planned = plan(&config).unwrap();

    assert_eq!(planned.len(), 1);
}

#[test]
fn test_plan_missing_location() {
    let root = tempdir().unwrap();
    let config = Config::new(root.path(), ["nope"]);

    let err = plan(&config).unwrap_err();
    assert!(matches!(err, RunnerError::Discovery { .. }));
}

#[test]
fn test_plan_corrupt_lock() {
    let root = tempdir().unwrap();
    write_files(&root.path().join("m"), &["01-a.sql"]);
    let config = Config::new(root.path(), ["m"]);
    fs::write(&config.lock_file, "{ \"migrations\": 7 }").unwrap();

    let err = plan(&config).unwrap_err();
    assert!(matches!(err, RunnerError::LockLoad(_)));
}

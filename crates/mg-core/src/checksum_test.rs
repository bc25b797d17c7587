use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_compute_checksum() {
    let checksum1 = compute_checksum(b"CREATE TABLE users (id INT);");
    let checksum2 = compute_checksum(b"CREATE TABLE users (id INT);");
    let checksum3 = compute_checksum(b"CREATE TABLE orders (id INT);");

    assert_eq!(checksum1, checksum2);
    assert_ne!(checksum1, checksum3);
    assert_eq!(checksum1.len(), 64); // SHA256 produces 64 hex chars
}

#[test]
fn test_compute_checksum_known_digest() {
    assert_eq!(
        compute_checksum(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        compute_checksum(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_checksum_file_matches_in_memory_digest() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("00-init.sql");
    let sql = "CREATE TABLE t (id INT);\nINSERT INTO t VALUES (1);\n";
    fs::write(&path, sql).unwrap();

    let digest = checksum_file(&path).unwrap();
    assert_eq!(digest, compute_checksum(sql.as_bytes()));
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_checksum_file_large_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("big.sql");
    let content = "SELECT 1;\n".repeat(100_000);
    fs::write(&path, &content).unwrap();

    assert_eq!(
        checksum_file(&path).unwrap(),
        compute_checksum(content.as_bytes())
    );
}

#[test]
fn test_checksum_file_missing() {
    let dir = tempdir().unwrap();
    let err = checksum_file(&dir.path().join("nope.sql")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

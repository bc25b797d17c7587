//! SHA-256 checksums of migration file contents.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Compute the lowercase hex SHA-256 digest of a byte slice
pub fn compute_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Stream a file through SHA-256 and return the lowercase hex digest.
///
/// The file handle is dropped on every return path, including read errors.
pub fn checksum_file(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
#[path = "checksum_test.rs"]
mod tests;

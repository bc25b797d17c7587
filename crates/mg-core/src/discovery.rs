//! Migration file discovery and ordering
//!
//! A location is either a directory, whose files are filtered by extension
//! and sorted with [`compare_migration_names`], or a glob pattern, whose
//! matches are taken in the order the pattern matcher yields them. Glob
//! results are deliberately not re-sorted.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Characters that turn a location string into a glob pattern
const GLOB_META: &[char] = &['*', '?', '['];

/// A configured place to look for migration files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Directory scanned non-recursively and sorted by migration name
    Directory(PathBuf),
    /// Glob pattern expanded by the `glob` crate
    Pattern(String),
}

impl Location {
    /// Classify a configured location string
    pub fn parse(location: &str) -> Self {
        if location.contains(GLOB_META) {
            Location::Pattern(location.to_string())
        } else {
            Location::Directory(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Directory(dir) => write!(f, "{}", dir.display()),
            Location::Pattern(pattern) => write!(f, "{}", pattern),
        }
    }
}

/// Leading run of ASCII digits parsed as an ordering number.
///
/// Runs too long for a `u64` count as no number at all.
fn ordering_number(name: &str) -> Option<u64> {
    let end = name
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(name.len(), |(idx, _)| idx);
    if end == 0 {
        return None;
    }
    name[..end].parse().ok()
}

/// Order two migration file names.
///
/// Names that both start with a number compare numerically (`2` before
/// `10`); equal numbers, and any pair where one side has no leading number,
/// compare lexicographically on the full name.
pub fn compare_migration_names(a: &str, b: &str) -> Ordering {
    match (ordering_number(a), ordering_number(b)) {
        (Some(na), Some(nb)) => na.cmp(&nb).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// List the migration files of a directory in apply order
pub fn list_directory(dir: &Path, config: &Config) -> CoreResult<Vec<PathBuf>> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(|e| CoreError::io(dir, e))? {
        let entry = entry.map_err(|e| CoreError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| CoreError::io(&entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let sort_key = name.to_string_lossy().into_owned();
        if !config.accepts_file_name(&sort_key) {
            log::debug!("Ignoring {}: unrecognized extension", entry.path().display());
            continue;
        }
        names.push((sort_key, name));
    }

    // Non-UTF-8 names sort on their lossy text but keep the real name
    names.sort_by(|(a, _), (b, _)| compare_migration_names(a, b));
    Ok(names.into_iter().map(|(_, name)| dir.join(name)).collect())
}

/// Expand a glob pattern into migration files, in matcher order
pub fn expand_pattern(pattern: &str, config: &Config) -> CoreResult<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| CoreError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            CoreError::io(&path, e.into())
        })?;
        if path.is_dir() {
            continue;
        }

        let accepted = path
            .file_name()
            .map(|name| config.accepts_file_name(&name.to_string_lossy()))
            .unwrap_or(false);
        if accepted {
            files.push(path);
        }
    }
    Ok(files)
}

/// Discover the candidate migration files of one location
pub fn discover(location: &Location, config: &Config) -> CoreResult<Vec<PathBuf>> {
    match location {
        Location::Directory(dir) => list_directory(dir, config),
        Location::Pattern(pattern) => expand_pattern(pattern, config),
    }
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;

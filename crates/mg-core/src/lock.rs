//! Lock ledger of applied migrations
//!
//! The ledger is a JSON document with a single `migrations` list. Membership
//! is decided by file path alone; the stored checksum is informational and is
//! never compared against the file on disk.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Ledger of migrations applied so far, in application order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Lock {
    /// Applied migrations, append-only
    #[serde(default)]
    pub migrations: Vec<AppliedMigration>,
}

/// One successfully applied migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMigration {
    /// Path of the migration file, the ledger's identity key
    pub filepath: String,

    /// When the migration was executed
    #[serde(rename = "timestamp")]
    pub applied_at: Timestamp,

    /// Hex SHA-256 of the file content at apply time
    #[serde(rename = "sum")]
    pub checksum: String,
}

impl AppliedMigration {
    /// Record a migration applied right now
    pub fn new(filepath: impl Into<String>, checksum: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            applied_at: Timestamp::now(),
            checksum: checksum.into(),
        }
    }
}

/// RFC 3339 time of an applied migration.
///
/// The text read from a lock file is written back unchanged, so saving a
/// loaded ledger never rewrites existing entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<FixedOffset>,
    text: String,
}

impl Timestamp {
    /// Current local time with its UTC offset
    pub fn now() -> Self {
        Local::now().fixed_offset().into()
    }

    /// Parse an RFC 3339 timestamp, keeping its original text
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self {
            instant: DateTime::parse_from_rfc3339(text)?,
            text: text.to_string(),
        })
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }

    /// Text as stored in the lock file
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self {
            text: instant.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            instant,
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        instant.fixed_offset().into()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse(&text).map_err(serde::de::Error::custom)
    }
}

impl Lock {
    /// Load the ledger from a file path.
    ///
    /// A missing file is the first-run state and yields an empty ledger.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No lock file at {}, starting empty", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(CoreError::io(path, e)),
        };

        serde_json::from_str(&content).map_err(|e| CoreError::LockParseError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Save the ledger to a file path atomically
    ///
    /// Writes indented JSON to a temp file next to `path`, then renames it
    /// over the target. The temp name includes the PID.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::io(parent, e))?;
        }

        let temp_path = path.with_extension(format!("json.{}.tmp", std::process::id()));
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        std::fs::write(&temp_path, &json).map_err(|e| CoreError::io(&temp_path, e))?;
        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            CoreError::io(path, e)
        })?;
        Ok(())
    }

    /// Check whether a file path has already been applied
    pub fn contains(&self, filepath: &str) -> bool {
        self.migrations.iter().any(|m| m.filepath == filepath)
    }

    /// Look up the record of an applied file path
    pub fn get(&self, filepath: &str) -> Option<&AppliedMigration> {
        self.migrations.iter().find(|m| m.filepath == filepath)
    }

    /// Append a newly applied migration
    pub fn record(&mut self, migration: AppliedMigration) {
        self.migrations.push(migration);
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}

#[cfg(test)]
#[path = "lock_test.rs"]
mod tests;

//! Configuration types and parsing for migrate.json

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Built-in defaults merged into a [`Config`] when a field is omitted.
pub mod defaults {
    /// File extensions recognized as migrations when none are configured
    pub const DEFAULT_FILE_EXTENSIONS: &[&str] = &[".sql"];

    /// Lock file name, resolved next to the config file
    pub const DEFAULT_LOCK_FILE: &str = ".migrate.lock.json";

    /// Config file name looked up by [`super::Config::load_from_dir`]
    pub const DEFAULT_CONFIG_FILE: &str = "migrate.json";
}

/// Migration configuration loaded from migrate.json
///
/// After [`Config::load`] or [`Config::new`] every location and the lock file
/// are absolute (or relative to the process working directory when the config
/// itself was given relatively), and the defaults have been filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Migration locations: directories or glob patterns, applied in order
    #[serde(default, alias = "dirs")]
    pub paths: Vec<String>,

    /// Recognized migration file extensions, including the leading dot
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Vec<String>,

    /// Path of the lock file that records applied migrations
    #[serde(default = "default_lock_file")]
    pub lock_file: PathBuf,
}

fn default_file_extensions() -> Vec<String> {
    defaults::DEFAULT_FILE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_lock_file() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_LOCK_FILE)
}

impl Config {
    /// Build a configuration programmatically, resolving `paths` and the
    /// default lock file against `base_dir`.
    pub fn new<I, S>(base_dir: &Path, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self {
            paths: paths.into_iter().map(Into::into).collect(),
            file_extensions: default_file_extensions(),
            lock_file: default_lock_file(),
        };
        config.resolve_relative_to(base_dir);
        config
    }

    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        let mut config: Config =
            serde_json::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                source: e,
            })?;
        config.validate()?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_relative_to(base_dir);

        if config.paths.is_empty() {
            log::warn!("{} lists no migration paths", path.display());
        }
        Ok(config)
    }

    /// Load configuration from a directory containing migrate.json
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        Self::load(&dir.join(defaults::DEFAULT_CONFIG_FILE))
    }

    /// Append locations as given, without resolving them
    pub fn add_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
    }

    /// Append another configuration's locations after this one's.
    ///
    /// Extensions and the lock file of `self` are kept.
    pub fn merge(&mut self, other: Config) {
        self.paths.extend(other.paths);
    }

    /// Check whether a file name carries one of the configured extensions
    pub fn accepts_file_name(&self, name: &str) -> bool {
        match file_extension(name) {
            Some(ext) => self.file_extensions.iter().any(|e| e == ext),
            None => false,
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.file_extensions.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "file_extensions cannot be empty; omit it to use the default"
                    .to_string(),
            });
        }

        for ext in &self.file_extensions {
            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "file extension '{}' must start with '.' (for example \".sql\")",
                        ext
                    ),
                });
            }
        }

        if self.lock_file.as_os_str().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "lock_file cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Join every relative location and the lock file onto `base_dir`
    fn resolve_relative_to(&mut self, base_dir: &Path) {
        for location in &mut self.paths {
            if Path::new(location.as_str()).is_relative() {
                *location = base_dir.join(location.as_str()).to_string_lossy().into_owned();
            }
        }

        if self.lock_file.is_relative() {
            self.lock_file = base_dir.join(&self.lock_file);
        }
    }
}

/// Extension of a file name: the suffix starting at its last `.`
pub fn file_extension(name: &str) -> Option<&str> {
    name.rfind('.').map(|idx| &name[idx..])
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

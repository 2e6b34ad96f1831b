//! Persistent user settings.
//!
//! Settings live in `settings.json` under the XDG config directory
//! (`~/.config/portsweep` on Linux). A missing file means defaults.

use super::scan::{DEFAULT_BANNER_TIMEOUT, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT};
use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the default settings file.
pub fn default_settings_path() -> ConfigResult<PathBuf> {
    let project =
        ProjectDirs::from("com", "portsweep", "portsweep").ok_or(ConfigError::DirectoryNotFound)?;
    Ok(project.config_dir().join("settings.json"))
}

/// User-level defaults applied beneath command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum concurrent connect attempts.
    pub concurrency: usize,
    /// Connect timeout in milliseconds.
    pub timeout_ms: u64,
    /// Banner read timeout in milliseconds.
    pub banner_timeout_ms: u64,
    /// First port of the numeric range (inclusive).
    pub start_port: u32,
    /// End of the numeric range (exclusive).
    pub end_port: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            banner_timeout_ms: DEFAULT_BANNER_TIMEOUT.as_millis() as u64,
            start_port: 1,
            end_port: 65535,
        }
    }
}

impl Settings {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> ConfigResult<Self> {
        let file = default_settings_path()?;
        if !file.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "concurrency": 50 }}"#).unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.concurrency, 50);
        assert_eq!(settings.timeout_ms, 500);
        assert_eq!(settings.end_port, 65535);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Settings::load_from(file.path()),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            Settings::load_from(&missing),
            Err(ConfigError::ReadFailed { .. })
        ));
    }
}

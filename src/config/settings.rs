use super::find_config_file_in;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "webfront.toml";

/// Release of this web front.
pub const NAV_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Operating system and architecture the process runs on, e.g. `linux-x86_64`.
pub fn os_version() -> String {
    format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// SQLite database holding accounts and dashboards
    pub database_path: String,

    /// `tracing` filter directive, e.g. `info,webfront=debug`
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: "webfront.db".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads `webfront.toml` from the config locations, or defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&super::config_locations())
    }

    pub fn load_from(locations: &[PathBuf]) -> Result<Self> {
        match find_config_file_in(locations, SETTINGS_FILE) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_when_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let content = "database_path = \"/var/lib/nav/webfront.db\"\n";
        fs::write(dir.path().join(SETTINGS_FILE), content).unwrap();

        let settings = Settings::load_from(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(settings.database_path, "/var/lib/nav/webfront.db");
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "database_path = [").unwrap();

        let err = Settings::load_from(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(err.to_string().contains("parsing"));
    }
}

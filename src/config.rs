//! Serama configuration.
//!
//! Loaded from `~/.serama/config.toml`. Every key is optional; a missing
//! file is the same as an empty one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Serama configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// The default user whose records commands operate on.
    /// Used when neither `--as` nor `SERAMA_USER` is given.
    pub user: Option<String>,

    /// Where per-user record databases live. Defaults to `~/.serama/users/`.
    pub storage_root: Option<PathBuf>,

    /// Default log filter, e.g. `"info"` or `"serama=debug"`.
    /// Overridden by `SERAMA_LOG`.
    pub log: Option<String>,
}

impl Config {
    /// Load config from `~/.serama/config.toml`, or defaults if it doesn't exist.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.serama/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".serama").join("config.toml"))
    }

    /// The configured storage root, falling back to `~/.serama/users/`.
    pub fn storage_root(&self) -> Option<PathBuf> {
        self.storage_root
            .clone()
            .or_else(|| dirs::home_dir().map(|h| h.join(".serama").join("users")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert!(config.user.is_none());
        assert!(config.storage_root.is_none());
        assert!(config.log.is_none());
    }

    #[test]
    fn reads_kebab_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "user = \"hatchery\"\nstorage-root = \"/srv/serama\"\nlog = \"serama=debug\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.user.as_deref(), Some("hatchery"));
        assert_eq!(config.storage_root(), Some(PathBuf::from("/srv/serama")));
        assert_eq!(config.log.as_deref(), Some("serama=debug"));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "user = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.contains("invalid config at"));
        assert!(err.contains("config.toml"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default-identity = \"someone\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}

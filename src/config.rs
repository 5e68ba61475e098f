//! Configuration file handling.
//!
//! This module provides loading of modbins configuration from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is read from:
//! - Linux: `~/.config/modbins/config.toml`
//! - macOS: `~/Library/Application Support/modbins/config.toml`
//! - Windows: `%APPDATA%\modbins\config.toml`
//!
//! or from the path passed with `--config`.
//!
//! # Example Configuration
//!
//! ```toml
//! module_command = "/usr/share/lmod/lmod/libexec/lmod"
//! query_shell = "bash"
//! query_timeout_secs = 30
//! modules_subdir = "modules/all"
//! sort = true
//! skip_hidden = true
//! default_format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{InventoryError, Result};

/// Environment variable Lmod exports with the path to its driver.
pub const LMOD_CMD_ENV: &str = "LMOD_CMD";

/// Application configuration.
///
/// Values not present in the file keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Module system driver to run for each module.
    ///
    /// Default: `$LMOD_CMD`, or `lmod` if unset
    pub module_command: String,

    /// Shell token passed to the driver before `show`.
    ///
    /// Default: "bash"
    pub query_shell: String,

    /// Seconds a single module query may run before it is killed.
    /// Zero disables the limit.
    ///
    /// Default: 30
    pub query_timeout_secs: u64,

    /// Location of module files relative to the installation prefix.
    ///
    /// Default: "modules/all"
    pub modules_subdir: PathBuf,

    /// Sort module identifiers and binary names for reproducible output.
    ///
    /// Default: false (filesystem order)
    pub sort: bool,

    /// Skip hidden (dot-prefixed) module files and directories.
    ///
    /// Default: false
    pub skip_hidden: bool,

    /// Output format used when `--format` is not given.
    ///
    /// Valid values: "map", "json", "table"
    /// Default: "map"
    pub default_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            module_command: std::env::var(LMOD_CMD_ENV)
                .ok()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "lmod".to_string()),
            query_shell: "bash".to_string(),
            query_timeout_secs: 30,
            modules_subdir: PathBuf::from("modules").join("all"),
            sort: false,
            skip_hidden: false,
            default_format: "map".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Config`] if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_err = |message: String| InventoryError::Config {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        toml::from_str(&content).map_err(|e| config_err(e.to_string()))
    }

    /// Returns the path to the default configuration file.
    ///
    /// # Example
    ///
    /// ```
    /// use modbins::Config;
    ///
    /// let path = Config::config_path();
    /// assert!(path.ends_with("modbins/config.toml"));
    /// ```
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("modbins")
            .join("config.toml")
    }

    /// The modules root for an installation prefix.
    pub fn modules_root(&self, prefix: &Path) -> PathBuf {
        prefix.join(&self.modules_subdir)
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        match self.query_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.query_shell, "bash");
        assert_eq!(config.query_timeout_secs, 30);
        assert_eq!(config.default_format, "map");
        assert!(!config.sort);
        assert!(!config.skip_hidden);
        assert!(!config.module_command.is_empty());
        assert_eq!(
            config.modules_root(Path::new("/opt/sw")),
            PathBuf::from("/opt/sw/modules/all")
        );
    }

    #[test]
    fn test_query_timeout() {
        let mut config = Config::default();
        assert_eq!(config.query_timeout(), Some(Duration::from_secs(30)));

        config.query_timeout_secs = 0;
        assert_eq!(config.query_timeout(), None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "sort = true\nmodule_command = \"/usr/bin/lmod\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.sort);
        assert_eq!(config.module_command, "/usr/bin/lmod");
        assert_eq!(config.query_shell, "bash");
        assert_eq!(config.modules_subdir, PathBuf::from("modules/all"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load_from(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, InventoryError::Config { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "sort = \"maybe\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(InventoryError::Config { .. })
        ));
    }

    #[test]
    fn test_roundtrips_through_toml() {
        let config = Config {
            sort: true,
            ..Config::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}

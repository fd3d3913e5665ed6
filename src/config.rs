use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::compatibility::ReleaseOverrides;
use crate::error::Error;
use crate::output::OutputFormat;

/// Application name, used for config directories
pub const APP_NAME: &str = "kube-dependency-checker";

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "KUBE_DEPENDENCY_CHECKER_LOG";

/// Configuration file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration file structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Output format used when `--output` is not given
    pub output: Option<OutputFormat>,
    pub log: LogConfig,
    /// Additional or replacement compatibility data, keyed by release
    pub releases: ReleaseOverrides,
    /// File this configuration was read from, None for defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Filter directive, e.g. "debug" or "kube_dependency_checker=trace"
    pub level: Option<String>,
    /// Write JSON logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from YAML text
    pub fn from_yaml(path: &Path, content: &str) -> Result<Self, Error> {
        serde_yaml::from_str(content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            source: Some(path.to_path_buf()),
            ..Self::from_yaml(path, &content)?
        })
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default config file is
    /// used when present, and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = config_path();
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Returns the config directory for kube-dependency-checker.
/// Uses $XDG_CONFIG_HOME/kube-dependency-checker if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/kube-dependency-checker,
/// or ./kube-dependency-checker if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join(APP_NAME)
}

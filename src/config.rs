//! Configuration management for branch-name-check.
//!
//! Settings come from `.branch-name-check.toml` in the current directory or
//! from the user config directory. Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::validator::DEFAULT_PATTERN;

/// Project-level config file name.
pub const FILE_NAME: &str = ".branch-name-check.toml";

/// Hook configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub check: CheckConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Branch check behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Pattern every branch name must match.
    #[serde(default = "default_branch_regex")]
    pub branch_regex: String,

    /// Only check the first target path.
    #[serde(default = "default_true")]
    pub fast_mode: bool,

    /// Budget for a single git call.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Print failures to the console.
    #[serde(default = "default_true")]
    pub verbose: bool,
}

/// Log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    #[serde(default)]
    pub mode: LogMode,

    /// `EnvFilter` directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// How an existing log file is opened.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    #[default]
    Append,
    Overwrite,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_branch_regex() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_log_file() -> PathBuf {
    PathBuf::from("branch_name_check.log")
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            branch_regex: default_branch_regex(),
            fast_mode: true,
            timeout_ms: default_timeout_ms(),
            verbose: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            mode: LogMode::default(),
            level: default_log_level(),
        }
    }
}

impl CheckConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Config file path inside a project directory.
    pub fn project_path(project_root: &Path) -> PathBuf {
        project_root.join(FILE_NAME)
    }

    /// User-level config file (`~/.config/branch-name-check/config.toml` on Linux).
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("branch-name-check").join("config.toml"))
    }

    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::ConfigParse(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Find and load the effective config.
    ///
    /// An explicit path must exist. Otherwise the project file wins over the
    /// user file, and defaults apply when neither exists.
    pub fn discover(explicit: Option<&Path>, project_root: &Path) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let project = Self::project_path(project_root);
        if project.exists() {
            return Self::load(&project);
        }

        match Self::user_path() {
            Some(user) if user.exists() => Self::load(&user),
            _ => Ok(Self::default()),
        }
    }
}

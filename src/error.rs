//! Error types for branch-name-check.

use std::path::PathBuf;

use thiserror::Error;

/// Hook error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("failed to compile regex {pattern}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("failed to run git in {}: {source}", dir.display())]
    GitSpawn {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("git timed out after {timeout_ms} ms in {}", dir.display())]
    GitTimeout { dir: PathBuf, timeout_ms: u128 },

    #[error("git reported an error: {0}")]
    GitStderr(String),

    #[error("git exited with {0}")]
    GitStatus(String),

    #[error("Hook error: {0}")]
    Hook(String),
}

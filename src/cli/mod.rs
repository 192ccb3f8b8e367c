//! Command-line interface for branch-name-check.

pub mod hooks;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, Dispatch};

use crate::check;
use crate::config::{Config, LogMode};
use crate::error::Error;
use crate::git::GitCli;
use crate::logging;
use crate::validator::Outcome;

/// Reject commits on branches that break the naming convention
#[derive(Parser, Debug)]
#[command(name = "branch-name-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Regex every branch name must match
    #[arg(long, value_name = "PATTERN")]
    pub branch_regex: Option<String>,

    /// Only check the first file ("true", case-insensitive, enables)
    #[arg(long, value_name = "BOOL")]
    pub fast_mode: Option<String>,

    /// Timeout for each git call, in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Don't print failures to the console
    #[arg(long, short)]
    pub quiet: bool,

    /// Config file (defaults to .branch-name-check.toml, then the user config)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Diagnostic log file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append to or overwrite the log file
    #[arg(long, value_enum)]
    pub log_mode: Option<LogMode>,

    /// Install a pre-commit hook in the repository in the current directory
    #[arg(long, conflicts_with_all = ["uninstall_hook", "filenames"])]
    pub install_hook: bool,

    /// Remove the pre-commit hook installed by --install-hook
    #[arg(long, conflicts_with = "filenames")]
    pub uninstall_hook: bool,

    /// Files to check (usually the staged files)
    pub filenames: Vec<PathBuf>,
}

impl Cli {
    /// Layer command-line options over the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref regex) = self.branch_regex {
            config.check.branch_regex = regex.clone();
        }
        if let Some(ref fast_mode) = self.fast_mode {
            config.check.fast_mode = check::parse_fast_mode(fast_mode);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.check.timeout_ms = timeout_ms;
        }
        if self.quiet {
            config.check.verbose = false;
        }
        if let Some(ref file) = self.log_file {
            config.log.file = file.clone();
        }
        if let Some(mode) = self.log_mode {
            config.log.mode = mode;
        }
    }
}

/// Run the command and report how the process should exit.
pub fn run(cli: Cli) -> Result<Outcome, Error> {
    let project_root = std::env::current_dir()?;
    let mut config = Config::discover(cli.config.as_deref(), &project_root)?;
    cli.apply(&mut config);

    let dispatch = logging::dispatch(&config.log)?;
    run_with_dispatch(&cli, &config, &project_root, &dispatch)
}

/// Run under `dispatch`; failures are logged here, once.
fn run_with_dispatch(
    cli: &Cli,
    config: &Config,
    project_root: &Path,
    dispatch: &Dispatch,
) -> Result<Outcome, Error> {
    tracing::dispatcher::with_default(dispatch, || {
        let result = if cli.install_hook {
            install_hook(project_root)
        } else if cli.uninstall_hook {
            uninstall_hook(project_root)
        } else {
            let query = GitCli::new(config.check.timeout());
            check::run(&config.check, &cli.filenames, query)
        };

        if let Err(ref e) = result {
            error!(error = %e, "branch-name-check failed");
        }
        result
    })
}

fn install_hook(project_root: &Path) -> Result<Outcome, Error> {
    if hooks::install(project_root)? {
        println!("Installed pre-commit hook.");
    } else {
        println!("Pre-commit hook already installed.");
    }
    Ok(Outcome::Passed)
}

fn uninstall_hook(project_root: &Path) -> Result<Outcome, Error> {
    if hooks::uninstall(project_root)? {
        println!("Removed pre-commit hook.");
    } else {
        println!("No pre-commit hook to remove.");
    }
    Ok(Outcome::Passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hook_arguments() {
        let cli = Cli::try_parse_from([
            "branch-name-check",
            "--branch-regex",
            "^main$",
            "--fast-mode",
            "False",
            "src/lib.rs",
            "README.md",
        ])
        .unwrap();

        assert_eq!(cli.branch_regex.as_deref(), Some("^main$"));
        assert_eq!(cli.fast_mode.as_deref(), Some("False"));
        assert_eq!(cli.filenames.len(), 2);
    }

    #[test]
    fn test_options_override_config() {
        let cli = Cli::try_parse_from([
            "branch-name-check",
            "--branch-regex=^release/.+$",
            "--fast-mode=FALSE",
            "--timeout-ms=250",
            "--quiet",
            "--log-mode=overwrite",
            "--log-file=/tmp/hook.log",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.check.branch_regex, "^release/.+$");
        assert!(!config.check.fast_mode);
        assert_eq!(config.check.timeout_ms, 250);
        assert!(!config.check.verbose);
        assert_eq!(config.log.mode, LogMode::Overwrite);
        assert_eq!(config.log.file, PathBuf::from("/tmp/hook.log"));
    }

    #[test]
    fn test_defaults_leave_config_untouched() {
        let cli = Cli::try_parse_from(["branch-name-check", "fileA.txt"]).unwrap();

        let mut config = Config::default();
        cli.apply(&mut config);

        assert!(config.check.fast_mode);
        assert!(config.check.verbose);
        assert_eq!(config.check.branch_regex, crate::validator::DEFAULT_PATTERN);
    }

    #[test]
    fn test_pattern_error_is_logged_once() {
        let temp = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["branch-name-check", "--branch-regex", "(unclosed", "a.rs"])
            .unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        config.log.file = temp.path().join("hook.log");
        config.check.verbose = false;

        let dispatch = logging::dispatch(&config.log).unwrap();
        let result = run_with_dispatch(&cli, &config, temp.path(), &dispatch);
        assert!(matches!(result, Err(Error::Pattern { .. })));

        let log = std::fs::read_to_string(&config.log.file).unwrap();
        assert_eq!(log.matches("failed to compile regex").count(), 1, "{}", log);
    }

    #[test]
    fn test_install_hook_conflicts_with_files() {
        let result = Cli::try_parse_from(["branch-name-check", "--install-hook", "fileA.txt"]);
        assert!(result.is_err());
    }
}

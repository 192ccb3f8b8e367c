//! Current-branch query against the git command-line tool.

use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;

use tracing::debug;

use crate::error::Error;

/// Asks a version-control tool which branch is checked out in a directory.
pub trait CurrentBranchQuery {
    fn current_branch(&self, dir: &Path) -> Result<String, Error>;
}

impl<Q: CurrentBranchQuery + ?Sized> CurrentBranchQuery for &Q {
    fn current_branch(&self, dir: &Path) -> Result<String, Error> {
        (**self).current_branch(dir)
    }
}

/// Runs `git rev-parse --abbrev-ref HEAD` as a subprocess.
#[derive(Debug, Clone)]
pub struct GitCli {
    timeout: Duration,
}

impl GitCli {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CurrentBranchQuery for GitCli {
    fn current_branch(&self, dir: &Path) -> Result<String, Error> {
        debug!(dir = %dir.display(), "Querying current branch");

        let handle = duct::cmd!("git", "rev-parse", "--abbrev-ref", "HEAD")
            .dir(dir)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .start()
            .map_err(|source| Error::GitSpawn {
                dir: dir.to_path_buf(),
                source,
            })?;

        let output = match handle.wait_timeout(self.timeout) {
            Ok(Some(output)) => output,
            Ok(None) => {
                // Reap the child so no process outlives the query.
                let _ = handle.kill();
                return Err(Error::GitTimeout {
                    dir: dir.to_path_buf(),
                    timeout_ms: self.timeout.as_millis(),
                });
            }
            Err(source) => {
                return Err(Error::GitSpawn {
                    dir: dir.to_path_buf(),
                    source,
                })
            }
        };

        let branch = parse_branch(&output.stdout, &output.stderr)?;
        check_status(output.status)?;
        Ok(branch)
    }
}

fn check_status(status: ExitStatus) -> Result<(), Error> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::GitStatus(status.to_string()))
    }
}

/// Extract the branch name from captured git output.
///
/// Anything on stderr counts as failure, even with a usable stdout.
fn parse_branch(stdout: &[u8], stderr: &[u8]) -> Result<String, Error> {
    let stderr = String::from_utf8_lossy(stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return Err(Error::GitStderr(stderr.to_string()));
    }

    let stdout = String::from_utf8_lossy(stdout);
    Ok(stdout.trim_end_matches(['\r', '\n']).to_string())
}

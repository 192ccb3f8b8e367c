//! Git pre-commit hook installation and removal.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Error;

/// Managed block markers.
const BLOCK_START: &str = "# >>> branch-name-check >>>";
const BLOCK_END: &str = "# <<< branch-name-check <<<";

const SHEBANG: &str = "#!/bin/sh";

/// Hook body. Git runs hooks from the top of the working tree, so the
/// default `.` target resolves the repository's branch.
const HOOK_BODY: &str = "# Rejects commits on branches that break the naming convention
branch-name-check || exit 1";

fn managed_block() -> String {
    format!("{}\n{}\n{}\n", BLOCK_START, HOOK_BODY, BLOCK_END)
}

/// Path of the pre-commit hook for the repository containing `dir`.
///
/// Asks git for the hooks directory, which also covers subdirectories,
/// linked worktrees and `core.hooksPath`.
pub fn hook_path(dir: &Path) -> Result<PathBuf, Error> {
    let output = duct::cmd!("git", "rev-parse", "--git-path", "hooks")
        .dir(dir)
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run()?;

    if !output.status.success() {
        return Err(Error::Hook(format!(
            "{} is not inside a git repository: {}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let hooks_dir = String::from_utf8_lossy(&output.stdout);
    Ok(dir.join(hooks_dir.trim_end()).join("pre-commit"))
}

/// Install the pre-commit hook, preserving any existing hook.
///
/// Returns `false` when the hook was already present.
pub fn install(dir: &Path) -> Result<bool, Error> {
    let path = hook_path(dir)?;
    if let Some(hooks_dir) = path.parent() {
        fs::create_dir_all(hooks_dir)?;
    }

    let content = if path.exists() {
        let existing = fs::read_to_string(&path)?;
        if existing.contains(BLOCK_START) {
            return Ok(false);
        }
        format!("{}\n\n{}", existing.trim_end(), managed_block())
    } else {
        format!("{}\n{}", SHEBANG, managed_block())
    };

    fs::write(&path, content)?;
    make_executable(&path)?;
    info!(path = %path.display(), "Installed pre-commit hook");
    Ok(true)
}

/// Remove the managed block, deleting the file if nothing else is left.
///
/// Returns `false` when there was nothing to remove.
pub fn uninstall(dir: &Path) -> Result<bool, Error> {
    let path = hook_path(dir)?;
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(&path)?;
    if !content.contains(BLOCK_START) {
        return Ok(false);
    }

    let cleaned = remove_managed_block(&content);
    if cleaned.trim().is_empty() || cleaned.trim() == SHEBANG {
        fs::remove_file(&path)?;
    } else {
        fs::write(&path, format!("{}\n", cleaned.trim_end()))?;
    }
    info!(path = %path.display(), "Removed pre-commit hook");
    Ok(true)
}

/// Drop the lines between the block markers, markers included.
fn remove_managed_block(content: &str) -> String {
    let mut inside = false;
    content
        .lines()
        .filter(|line| {
            if line.trim() == BLOCK_START {
                inside = true;
                return false;
            }
            if inside {
                if line.trim() == BLOCK_END {
                    inside = false;
                }
                return false;
            }
            true
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), Error> {
    Ok(())
}

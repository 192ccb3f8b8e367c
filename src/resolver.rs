//! Resolve the checked-out branch for a staged path.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::Error;
use crate::git::CurrentBranchQuery;

/// Maps paths to the branch checked out in their working tree.
#[derive(Debug)]
pub struct BranchResolver<Q> {
    query: Q,
    verbose: bool,
}

impl<Q: CurrentBranchQuery> BranchResolver<Q> {
    pub fn new(query: Q, verbose: bool) -> Self {
        Self { query, verbose }
    }

    /// Branch name for the working tree containing `path`.
    ///
    /// Returns `None` when git fails, times out or writes to stderr. The
    /// failure is logged, and printed in verbose mode.
    pub fn resolve(&self, path: &Path) -> Option<String> {
        let result = working_dir(path).and_then(|dir| self.query.current_branch(&dir));

        match result {
            Ok(branch) => {
                debug!(path = %path.display(), branch = %branch, "Resolved branch name");
                Some(branch)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to get branch name");
                if self.verbose {
                    println!("unable to get branch name for {}: {}", path.display(), e);
                }
                None
            }
        }
    }
}

/// Absolute directory to run the branch query in.
///
/// Directories are used as-is; anything else (a file, or a path that no
/// longer exists) is replaced by its parent.
pub fn working_dir(path: &Path) -> Result<PathBuf, Error> {
    let absolute = std::path::absolute(path)?;
    if absolute.is_dir() {
        return Ok(absolute);
    }
    match absolute.parent() {
        Some(parent) => Ok(parent.to_path_buf()),
        None => Ok(absolute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Answers every query with a fixed result and records the directories.
    struct FakeQuery {
        answer: Option<&'static str>,
        dirs: RefCell<Vec<PathBuf>>,
    }

    impl FakeQuery {
        fn new(answer: Option<&'static str>) -> Self {
            Self {
                answer,
                dirs: RefCell::new(Vec::new()),
            }
        }
    }

    impl CurrentBranchQuery for FakeQuery {
        fn current_branch(&self, dir: &Path) -> Result<String, Error> {
            self.dirs.borrow_mut().push(dir.to_path_buf());
            self.answer
                .map(str::to_string)
                .ok_or_else(|| Error::GitStderr("fatal: not a git repository".to_string()))
        }
    }

    #[test]
    fn test_working_dir_of_file_is_parent() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("fileA.txt");
        std::fs::write(&file, "a").unwrap();

        assert_eq!(working_dir(&file).unwrap(), temp.path());
    }

    #[test]
    fn test_working_dir_of_directory_is_itself() {
        let temp = TempDir::new().unwrap();
        assert_eq!(working_dir(temp.path()).unwrap(), temp.path());
    }

    #[test]
    fn test_working_dir_is_absolute() {
        let dir = working_dir(Path::new("some/relative/file.rs")).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("some/relative"));
    }

    #[test]
    fn test_resolve_returns_branch() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("fileA.txt");
        std::fs::write(&file, "a").unwrap();

        let query = FakeQuery::new(Some("feat/123/add-login"));
        let resolver = BranchResolver::new(&query, false);

        assert_eq!(resolver.resolve(&file).as_deref(), Some("feat/123/add-login"));
        assert_eq!(query.dirs.borrow().as_slice(), [temp.path().to_path_buf()]);
    }

    #[test]
    fn test_resolve_failure_is_none() {
        let query = FakeQuery::new(None);
        let resolver = BranchResolver::new(&query, true);

        assert_eq!(resolver.resolve(Path::new(".")), None);
        assert_eq!(query.dirs.borrow().len(), 1);
    }
}

//! Branch name validation against the naming pattern.

use regex::Regex;
use tracing::{error, info};

use crate::error::Error;

/// Trunk branches, or `type/issue/description` feature branches.
pub const DEFAULT_PATTERN: &str =
    r"^(master|main|staging)$|^((feat|docs|chore|debug|test)/(\d+|quick)/[\w-]+)$";

/// Aggregate result of a branch name check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every checked name matched the pattern.
    Passed,
    /// At least one name did not match.
    Mismatch,
    /// At least one path yielded no branch name.
    Unresolved,
}

impl Outcome {
    /// Process exit status for this outcome.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Passed => 0,
            Outcome::Mismatch | Outcome::Unresolved => 1,
        }
    }
}

/// Compile a branch pattern.
pub fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Check every resolved branch name against `pattern`.
///
/// A single unresolved name fails the whole check before any matching is
/// done. Otherwise all names are matched so every mismatch gets reported.
/// `is_match` searches for the pattern anywhere in the name; full-name
/// matching relies on the pattern's own anchors.
pub fn validate<S: AsRef<str>>(pattern: &Regex, names: &[Option<S>], verbose: bool) -> Outcome {
    if names.iter().any(Option::is_none) {
        for (index, _) in names.iter().enumerate().filter(|(_, name)| name.is_none()) {
            error!(index, "branch name could not be resolved");
            if verbose {
                println!("branch name for target #{} could not be resolved", index + 1);
            }
        }
        return Outcome::Unresolved;
    }

    let mut outcome = Outcome::Passed;
    for name in names.iter().flatten() {
        let name: &str = name.as_ref();
        if pattern.is_match(name) {
            info!(branch = name, pattern = %pattern, "branch name matches regex");
        } else {
            error!(branch = name, pattern = %pattern, "branch name does not match regex");
            if verbose {
                println!("branch name {} does not match regex {}", name, pattern);
            }
            outcome = Outcome::Mismatch;
        }
    }

    outcome
}

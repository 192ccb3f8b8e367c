//! Branch naming check over the staged paths.

use std::path::PathBuf;

use tracing::debug;

use crate::config::CheckConfig;
use crate::error::Error;
use crate::git::CurrentBranchQuery;
use crate::resolver::BranchResolver;
use crate::validator::{self, Outcome};

/// Resolve and validate the branch for `paths`.
///
/// The pattern is compiled before any git call, so an invalid pattern never
/// spawns a subprocess. With fast mode on only the first path is resolved.
/// No paths at all means the current directory.
pub fn run<Q: CurrentBranchQuery>(
    config: &CheckConfig,
    paths: &[PathBuf],
    query: Q,
) -> Result<Outcome, Error> {
    debug!(pattern = %config.branch_regex, "Effective branch regex");

    let pattern = validator::compile(&config.branch_regex)?;

    let current_dir = [PathBuf::from(".")];
    let paths = if paths.is_empty() {
        &current_dir[..]
    } else {
        paths
    };
    let targets = if config.fast_mode { &paths[..1] } else { paths };
    debug!(
        fast_mode = config.fast_mode,
        requested = paths.len(),
        checked = targets.len(),
        "Resolving branch names"
    );

    let resolver = BranchResolver::new(query, config.verbose);
    let names: Vec<Option<String>> = targets
        .iter()
        .map(|path| resolver.resolve(path.as_path()))
        .collect();

    Ok(validator::validate(&pattern, &names, config.verbose))
}

/// Whether a `--fast-mode` value enables fast mode.
pub fn parse_fast_mode(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

//! branch-name-check - pre-commit hook enforcing branch naming.

use std::process::ExitCode;

use clap::Parser;

use branch_name_check::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli::run(cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

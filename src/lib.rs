//! branch-name-check library.
//!
//! Pre-commit hook that rejects commits made on branches whose names break
//! the naming convention.

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod resolver;
pub mod validator;

pub use error::Error;
pub use validator::{Outcome, DEFAULT_PATTERN};

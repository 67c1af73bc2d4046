//! # CLI Command Implementations
//!
//! Each subcommand of `repo-aggregate` lives in its own file with:
//! - an `Args` struct deriving `clap::Args`;
//! - an `execute` function that turns the arguments into library calls.

pub mod authors;
pub mod convert;
pub mod run;

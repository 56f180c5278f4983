//! Subcommands of the `resumex` binary.

pub mod batch;
pub mod config;
pub mod extract;

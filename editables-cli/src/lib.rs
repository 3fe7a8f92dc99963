//! Library exports for editables-cli.
//!
//! Exposes the CLI structure so tests and tooling can inspect the command
//! tree without running the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;

//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, DevelopCommand, InstallCommand, InstallersCommand, ProbeCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for editable installs of Python packages.
#[derive(Parser)]
#[command(name = "editables")]
#[command(version, about = "Install Python source trees editably", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read the user configuration from this directory
    #[arg(long, value_name = "PATH", global = true, env = "EDITABLES_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Install source trees editably into an output directory
    Install(InstallCommand),

    /// Build and install a project with pip, then relink it editably
    Develop(DevelopCommand),

    /// List the available installation methods
    Installers(InstallersCommand),

    /// Check whether symlinks can be created in a directory
    Probe(ProbeCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

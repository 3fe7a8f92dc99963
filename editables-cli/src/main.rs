//! Main entry point for the editables CLI.
//!
//! This is the command-line interface for editable installs of Python
//! packages. It provides commands for:
//! - `install`: Install a source tree editably into a directory
//! - `develop`: Build, install and then editably relink a project with pip
//! - `installers`: List the available installation methods
//! - `probe`: Check whether symlinks work in a directory
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _logger = editables::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config_dir: cli.config_dir,
    };

    let result = match cli.command {
        cli::Command::Install(cmd) => cmd.execute(&global),
        cli::Command::Develop(cmd) => cmd.execute(&global),
        cli::Command::Installers(cmd) => cmd.execute(&global),
        cli::Command::Probe(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

//! Command to check symlink support in a directory.

use crate::error::CliError;
use crate::utils::{resolve_output_dir, GlobalOptions};
use clap::Args;
use editables::probe::can_symlink;
use std::path::PathBuf;

/// Check whether symbolic links can be created in a directory.
///
/// Prints `supported` or `unsupported`. With `--check`, an unsupported
/// directory also exits with status 1.
#[derive(Args)]
pub struct ProbeCommand {
    /// Directory to probe
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Exit with an error when symlinks are unsupported
    #[arg(long)]
    pub check: bool,
}

impl ProbeCommand {
    /// Execute the probe command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let output_dir = resolve_output_dir(&self.output_dir)?;

        if can_symlink(&output_dir) {
            println!("supported");
            return Ok(());
        }

        println!("unsupported");
        if self.check {
            return Err(CliError::SemanticFailure(format!(
                "Symlinks cannot be created in {}",
                output_dir.display()
            )));
        }
        Ok(())
    }
}

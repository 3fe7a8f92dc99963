//! Install command implementation.
//!
//! This module implements the `install` command, which links source trees
//! into an output directory with the selected installation method.

use crate::error::CliError;
use crate::utils::{
    load_configuration, load_metadata, normalize_path, resolve_output_dir, GlobalOptions,
};
use clap::Args;
use editables::config::Config;
use editables::{install, EditableMetadata, EditableStrategy, InstallOptions, InstallerRegistry};
use std::path::{Path, PathBuf};

/// Install source trees editably into an output directory.
#[derive(Args)]
pub struct InstallCommand {
    /// Alternating source paths and target names (SOURCE TARGET ...)
    #[arg(value_name = "SOURCE TARGET", required_unless_present = "metadata")]
    pub paths: Vec<String>,

    /// Directory to install into (usually site-packages)
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Installation strategy (lax or strict)
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<EditableStrategy>,

    /// Installation method to use instead of automatic selection; repeat to
    /// give a fallback chain tried in order
    #[arg(long = "method", value_name = "LABEL")]
    pub installers: Vec<String>,

    /// Append created files to this RECORD file
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Read the path mapping from a JSON metadata file
    #[arg(long, value_name = "FILE", conflicts_with = "paths")]
    pub metadata: Option<PathBuf>,

    /// Show what would be installed without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

impl InstallCommand {
    /// Execute the install command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let output_dir = resolve_output_dir(&self.output_dir)?;
        let metadata = load_metadata(self.metadata.as_deref(), &self.paths)?;

        let record = self.record.as_deref().map(normalize_path).transpose()?;
        let config = load_configuration(
            global,
            Config {
                strategy: self.strategy,
                installer: (!self.installers.is_empty()).then_some(self.installers),
                record,
                log_mode: None,
            },
        )?;
        let options = config.install_options();

        if self.dry_run {
            return dry_run(&output_dir, &metadata, &options, global);
        }

        let created = install(InstallerRegistry::global(), &output_dir, &metadata, &options)?;

        for path in &created {
            println!("{}", path.display());
        }
        if !global.quiet {
            eprintln!(
                "Installed {} path(s) into {}",
                metadata.paths.len(),
                output_dir.display()
            );
        }
        Ok(())
    }
}

fn dry_run(
    output_dir: &Path,
    metadata: &EditableMetadata,
    options: &InstallOptions,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    let method = InstallerRegistry::global().select(
        output_dir,
        options.strategy(),
        &options.installer_labels(),
    )?;

    println!(
        "Would install {} path(s) into {} using '{}' ({})",
        metadata.paths.len(),
        output_dir.display(),
        method.label(),
        options.strategy()
    );
    if global.verbose {
        for (target, source) in metadata.paths.iter() {
            println!("  {target} -> {}", source.display());
        }
    }
    if let Some(record) = options.record() {
        println!("Would record created files in {}", record.display());
    }
    Ok(())
}

//! Develop command implementation.
//!
//! Installs a project the regular way with pip, then relinks its sources
//! editably into the same location:
//!
//! 1. Build a wheel for the project without dependencies.
//! 2. Strip the wheel down to its metadata, so installing it only registers
//!    the distribution.
//! 3. Install the stripped wheel.
//! 4. Find where the distribution landed.
//! 5. Install the source mapping there and append to the distribution's
//!    `RECORD`, so uninstalling removes the editable files too.

use crate::error::CliError;
use crate::utils::{load_configuration, mapping_from_pairs, GlobalOptions};
use clap::Args;
use editables::collab::{distribution_name, record_path, strip_wheel, PackageManager, Pip};
use editables::config::Config;
use editables::{install, EditableMetadata, EditableStrategy, InstallerRegistry};
use std::path::PathBuf;

/// Build and install a project with pip, then relink it editably.
#[derive(Args)]
pub struct DevelopCommand {
    /// Alternating source paths and target names (SOURCE TARGET ...)
    #[arg(value_name = "SOURCE TARGET", required = true)]
    pub paths: Vec<String>,

    /// Installation strategy (lax or strict)
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<EditableStrategy>,

    /// Installation method to use instead of automatic selection; repeat to
    /// give a fallback chain tried in order
    #[arg(long = "method", value_name = "LABEL")]
    pub installers: Vec<String>,

    /// Requirement specifier to build, with optional extras
    #[arg(long, value_name = "SPEC", default_value = ".")]
    pub spec: String,

    /// Python interpreter to run pip with
    #[arg(long, value_name = "EXE", default_value = "python3", env = "EDITABLES_PYTHON")]
    pub python: PathBuf,
}

impl DevelopCommand {
    /// Execute the develop command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let pip = Pip::new(&self.python);
        let created = self.develop_with(&pip, global)?;

        for path in &created {
            println!("{}", path.display());
        }
        Ok(())
    }

    /// Run the develop flow against any package manager.
    pub fn develop_with(
        self,
        package_manager: &dyn PackageManager,
        global: &GlobalOptions,
    ) -> Result<Vec<PathBuf>, CliError> {
        // Fail on bad arguments before anything gets built.
        let metadata = EditableMetadata::new(mapping_from_pairs(&self.paths)?);

        let wheel_dir = tempfile::tempdir()?;
        let wheel = package_manager.build_wheel(&self.spec, wheel_dir.path())?;
        let kept = strip_wheel(&wheel)?;
        log::debug!("stripped wheel keeps {} entr(ies)", kept.len());
        package_manager.install_wheel(&wheel, &self.spec)?;

        let name = distribution_name(&wheel)?;
        let distribution = package_manager.find_installed(&name)?;
        let record = record_path(&distribution.location, &name, &distribution.version);
        log::info!(
            "{} {} installed in {}",
            distribution.name,
            distribution.version,
            distribution.location.display()
        );

        let config = load_configuration(
            global,
            Config {
                strategy: self.strategy,
                installer: (!self.installers.is_empty()).then_some(self.installers),
                record: Some(record),
                log_mode: None,
            },
        )?;

        let created = install(
            InstallerRegistry::global(),
            &distribution.location,
            &metadata,
            &config.install_options(),
        )?;

        if !global.quiet {
            eprintln!(
                "Linked {} into {}",
                distribution.name,
                distribution.location.display()
            );
        }
        Ok(created)
    }
}

//! Command to list the available installation methods.

use crate::error::CliError;
use crate::utils::{normalize_path, GlobalOptions};
use clap::Args;
use editables::InstallerRegistry;
use serde::Serialize;
use std::path::PathBuf;

/// List the registered installation methods in selection order.
#[derive(Args)]
pub struct InstallersCommand {
    /// Also report whether each method is usable in this directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct InstallerRow {
    label: String,
    priority: i32,
    strategies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capable: Option<bool>,
}

impl InstallersCommand {
    /// Execute the installers command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let output_dir = self.output_dir.as_deref().map(normalize_path).transpose()?;

        let rows: Vec<InstallerRow> = InstallerRegistry::global()
            .iter()
            .map(|method| InstallerRow {
                label: method.label().to_string(),
                priority: method.priority(),
                strategies: method
                    .supported_strategies()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                capable: output_dir.as_deref().map(|dir| method.is_capable(dir)),
            })
            .collect();

        if self.json {
            let json = serde_json::to_string_pretty(&rows).map_err(editables::Error::from)?;
            println!("{json}");
            return Ok(());
        }

        println!("{:<12} {:>8}  {:<12}  CAPABLE", "LABEL", "PRIORITY", "STRATEGIES");
        for row in rows {
            let capable = match row.capable {
                Some(true) => "yes",
                Some(false) => "no",
                None => "-",
            };
            println!(
                "{:<12} {:>8}  {:<12}  {capable}",
                row.label,
                row.priority,
                row.strategies.join(",")
            );
        }
        Ok(())
    }
}

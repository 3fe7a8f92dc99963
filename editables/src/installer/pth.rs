//! Search-path injection through a `.pth` file.
//!
//! The environment reads `.pth` files at startup and appends each line to
//! the module search path. Only whole directories can be exposed this way,
//! so the installer requires that every package is named on disk exactly as
//! it is at install time.

use std::fs;
use std::path::PathBuf;

use super::{path_str, unique_base_name, InstallMethod, InstallRequest};
use crate::error::Result;
use crate::path::algebra::{find_outermost_entity, find_parent_folder, uniq};
use crate::strategy::EditableStrategy;

/// Installs by listing parent folders in a `.pth` file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PthFileInstaller;

impl PthFileInstaller {
    /// Registry label.
    pub const LABEL: &'static str = "pth_file";
}

impl InstallMethod for PthFileInstaller {
    fn label(&self) -> &str {
        Self::LABEL
    }

    fn priority(&self) -> i32 {
        20
    }

    fn supported_strategies(&self) -> &[EditableStrategy] {
        &[EditableStrategy::Lax]
    }

    fn install(&self, request: &InstallRequest<'_>) -> Result<Vec<PathBuf>> {
        let folders = request
            .metadata
            .paths
            .iter()
            .map(|(target, source)| find_parent_folder(target, source))
            .collect::<Result<Vec<_>>>()?;
        let folders = uniq(folders);

        let lines = folders
            .iter()
            .map(|f| path_str(f))
            .collect::<Result<Vec<_>>>()?;
        let contents = lines.join("\n");

        // Packages sharing a source root share contents, so the file name
        // also covers what is installed.
        let names = uniq(
            request
                .metadata
                .paths
                .iter()
                .map(|(target, source)| find_outermost_entity(target, source).0),
        );
        let pth_file = request.output_directory.join(format!(
            "{}.pth",
            unique_base_name(&format!("{}\n{contents}", names.join(",")))
        ));
        log::debug!(
            "writing {} search path entr{} to {}",
            lines.len(),
            if lines.len() == 1 { "y" } else { "ies" },
            pth_file.display()
        );
        fs::write(&pth_file, contents)?;

        Ok(vec![pth_file])
    }
}

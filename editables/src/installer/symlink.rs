//! Symlink farm installer.
//!
//! `lax` links each outermost entity (a top-level package directory or
//! module file) once; `strict` recreates the directory skeleton and links
//! every file individually. Partial failures are not rolled back.

use std::fs;
use std::path::{Path, PathBuf};

use super::{InstallMethod, InstallRequest};
use crate::error::Result;
use crate::metadata::PathMapping;
use crate::path::algebra::{outermost_entities, uniq};
use crate::probe::{can_symlink, symlink};
use crate::strategy::EditableStrategy;

/// Installs by creating symbolic links in the output directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymlinkInstaller;

impl SymlinkInstaller {
    /// Registry label.
    pub const LABEL: &'static str = "symlink";
}

impl InstallMethod for SymlinkInstaller {
    fn label(&self) -> &str {
        Self::LABEL
    }

    fn priority(&self) -> i32 {
        0
    }

    fn supported_strategies(&self) -> &[EditableStrategy] {
        &EditableStrategy::ALL
    }

    fn is_capable(&self, output_directory: &Path) -> bool {
        can_symlink(output_directory)
    }

    fn install(&self, request: &InstallRequest<'_>) -> Result<Vec<PathBuf>> {
        let paths = &request.metadata.paths;
        match request.strategy {
            EditableStrategy::Lax => link_outermost(request.output_directory, paths),
            EditableStrategy::Strict => link_files(request.output_directory, paths),
        }
    }
}

fn link_outermost(output_directory: &Path, paths: &PathMapping) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for (target, source) in outermost_entities(paths)? {
        let link = output_directory.join(&target);
        log::debug!("linking {} -> {}", link.display(), source.display());
        symlink(&source, &link)?;
        created.push(link);
    }
    Ok(created)
}

fn link_files(output_directory: &Path, paths: &PathMapping) -> Result<Vec<PathBuf>> {
    let packages = uniq(
        paths
            .targets()
            .filter_map(|t| t.rsplit_once('/').map(|(dir, _)| dir)),
    );
    for package in packages {
        fs::create_dir_all(output_directory.join(package))?;
    }

    let mut created = Vec::with_capacity(paths.len());
    for (target, source) in paths.iter() {
        let link = output_directory.join(target);
        log::debug!("linking {} -> {}", link.display(), source.display());
        symlink(source, &link)?;
        created.push(link);
    }
    Ok(created)
}

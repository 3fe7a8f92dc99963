//! Import redirection through a bundled runtime hook.
//!
//! Writes a copy of the redirector runtime next to a `.pth` file that
//! imports it at interpreter startup and registers a table of top-level
//! module names to file locations. Unlike a plain `.pth` install, each name
//! can point anywhere on disk.

use std::fs;
use std::path::PathBuf;

use super::{path_str, unique_base_name, InstallMethod, InstallRequest};
use crate::error::{Error, Result};
use crate::path::algebra::{
    check_subpath, normalize_module_name, normalize_package_path, outermost_entities,
};
use crate::strategy::EditableStrategy;

/// Python source of the import hook written by every redirector install.
pub const REDIRECTOR_RUNTIME: &str = include_str!("redirector.py");

/// Installs by registering an import hook for each top-level name.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedirectorInstaller;

impl RedirectorInstaller {
    /// Registry label.
    pub const LABEL: &'static str = "redirector";
}

impl InstallMethod for RedirectorInstaller {
    fn label(&self) -> &str {
        Self::LABEL
    }

    fn priority(&self) -> i32 {
        10
    }

    fn supported_strategies(&self) -> &[EditableStrategy] {
        &[EditableStrategy::Lax]
    }

    fn is_capable(&self, _output_directory: &std::path::Path) -> bool {
        !REDIRECTOR_RUNTIME.trim().is_empty()
    }

    fn install(&self, request: &InstallRequest<'_>) -> Result<Vec<PathBuf>> {
        let table = redirection_table(request)?;
        let literal = render_table(&table)?;

        let base_name = unique_base_name(&literal);
        let runtime_path = request.output_directory.join(format!("{base_name}.py"));
        let pth_path = request.output_directory.join(format!("{base_name}.pth"));

        log::debug!(
            "redirecting {} name(s) via {}",
            table.len(),
            runtime_path.display()
        );
        fs::write(&runtime_path, REDIRECTOR_RUNTIME)?;
        fs::write(
            &pth_path,
            format!("import {base_name}; {base_name}.install_redirector({literal})"),
        )?;

        Ok(vec![runtime_path, pth_path])
    }
}

/// Map each top-level import name to the file it loads from.
fn redirection_table(request: &InstallRequest<'_>) -> Result<Vec<(String, PathBuf)>> {
    let mut table: Vec<(String, PathBuf)> = Vec::new();

    for (target, source) in outermost_entities(&request.metadata.paths)? {
        check_subpath(&target, &source)?;
        let name = normalize_module_name(&target).to_string();
        let file = normalize_package_path(&source)?;

        match table.iter().find(|(n, _)| *n == name) {
            Some((_, existing)) if *existing == file => {}
            Some((_, existing)) => {
                return Err(Error::operation(
                    format!(
                        "The import name '{name}' is provided by both {} and {}",
                        existing.display(),
                        file.display()
                    ),
                    target,
                    source,
                ));
            }
            None => table.push((name, file)),
        }
    }

    Ok(table)
}

/// Render the table as a Python dict literal.
///
/// JSON string escapes are a subset of Python string literal escapes.
fn render_table(table: &[(String, PathBuf)]) -> Result<String> {
    let entries = table
        .iter()
        .map(|(name, file)| {
            Ok(format!(
                "{}: {}",
                serde_json::to_string(name)?,
                serde_json::to_string(path_str(file)?)?
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("{{{}}}", entries.join(", ")))
}

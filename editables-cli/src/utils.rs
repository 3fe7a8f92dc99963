//! Utility functions for CLI operations.
//!
//! This module provides helpers shared across commands: path resolution,
//! configuration loading and turning `SOURCE TARGET` arguments into a path
//! mapping.

use crate::error::CliError;
use editables::collab::{map_directory, slice_pairs};
use editables::config::{Config, ConfigBuilder};
use editables::path::normalize;
use editables::{EditableMetadata, PathMapping};
use std::env;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the user configuration directory.
    pub config_dir: Option<PathBuf>,
}

/// Resolve a path, using CWD if not specified.
///
/// Paths are normalized (made absolute, `~` expanded, `.`/`..` folded) but
/// not canonicalized, so symlinked directories are kept as given.
pub fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let path_to_resolve = match path {
        Some(p) => p,
        None => env::current_dir()?,
    };

    normalize_path(&path_to_resolve)
}

/// Normalize a path (make absolute, expand ~, etc.) without following symlinks.
pub fn normalize_path(path: &Path) -> Result<PathBuf, CliError> {
    normalize::normalize(path).map_err(CliError::from)
}

/// Resolve an output directory, which must already exist.
pub fn resolve_output_dir(path: &Path) -> Result<PathBuf, CliError> {
    let resolved = normalize_path(path)?;
    if !resolved.is_dir() {
        return Err(CliError::InvalidArguments(format!(
            "Output directory does not exist: {}",
            resolved.display()
        )));
    }
    Ok(resolved)
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Command-line overrides (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
///
/// Unreadable or malformed files are configuration errors; values that
/// fail validation are reported as invalid arguments.
pub fn load_configuration(global: &GlobalOptions, overrides: Config) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_config(overrides);
    if let Some(ref dir) = global.config_dir {
        builder = builder.with_config_dir(dir);
    }

    builder.build().map_err(|e| match e {
        editables::Error::Configuration(_) => CliError::Config(e.to_string()),
        other => CliError::from(other),
    })
}

/// Build the path mapping from `SOURCE TARGET` argument pairs.
///
/// Each source is scanned recursively and every file is mapped below its
/// target.
pub fn mapping_from_pairs(paths: &[String]) -> Result<PathMapping, CliError> {
    let pairs = slice_pairs(paths).map_err(|e| CliError::InvalidArguments(e.to_string()))?;

    let mut mapping = PathMapping::new();
    for (source, target) in pairs {
        let source = normalize_path(Path::new(&source))?;
        if !source.exists() {
            return Err(CliError::InvalidArguments(format!(
                "Source does not exist: {}",
                source.display()
            )));
        }
        mapping.extend_from(&map_directory(&source, &target)?)?;
    }
    Ok(mapping)
}

/// Metadata from a JSON file if given, otherwise from argument pairs.
pub fn load_metadata(
    metadata_file: Option<&Path>,
    paths: &[String],
) -> Result<EditableMetadata, CliError> {
    let metadata = match metadata_file {
        Some(file) => EditableMetadata::from_json_file(&normalize_path(file)?)?,
        None => EditableMetadata::new(mapping_from_pairs(paths)?),
    };

    if metadata.paths.is_empty() {
        return Err(CliError::InvalidArguments(
            "Nothing to install: no source files were found".to_string(),
        ));
    }
    Ok(metadata)
}

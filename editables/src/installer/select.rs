//! The `install` entry point: select, bind, run, record.

use std::path::{Path, PathBuf};

use super::{Installer, InstallerRegistry};
use crate::error::Result;
use crate::metadata::EditableMetadata;
use crate::record::append_to_record;
use crate::strategy::EditableStrategy;

/// Per-call install options.
///
/// # Examples
///
/// ```
/// use editables::installer::InstallOptions;
/// use editables::EditableStrategy;
///
/// let options = InstallOptions::new(EditableStrategy::Strict)
///     .with_installer("symlink")
///     .with_installer("redirector")
///     .with_record("/venv/lib/site-packages/foo-1.0.dist-info/RECORD");
/// assert_eq!(options.installers(), ["symlink", "redirector"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    strategy: EditableStrategy,
    installers: Vec<String>,
    record: Option<PathBuf>,
}

impl InstallOptions {
    /// Options for `strategy` with automatic selection and no record.
    #[must_use]
    pub fn new(strategy: EditableStrategy) -> Self {
        Self {
            strategy,
            installers: Vec::new(),
            record: None,
        }
    }

    /// Append a label to the fallback chain.
    ///
    /// With a non-empty chain only the listed installers are tried, in the
    /// order they were added.
    #[must_use]
    pub fn with_installer(mut self, label: impl Into<String>) -> Self {
        self.installers.push(label.into());
        self
    }

    /// Append several labels to the fallback chain.
    #[must_use]
    pub fn with_installers<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.installers.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Append created files to this ledger after a successful install.
    #[must_use]
    pub fn with_record(mut self, path: impl Into<PathBuf>) -> Self {
        self.record = Some(path.into());
        self
    }

    /// Requested strategy.
    #[must_use]
    pub fn strategy(&self) -> EditableStrategy {
        self.strategy
    }

    /// Fallback chain of installer labels; empty means every installer.
    #[must_use]
    pub fn installers(&self) -> &[String] {
        &self.installers
    }

    /// The fallback chain as borrowed labels, ready for
    /// [`InstallerRegistry::select`].
    #[must_use]
    pub fn installer_labels(&self) -> Vec<&str> {
        self.installers.iter().map(String::as_str).collect()
    }

    /// Ledger to append to, if any.
    #[must_use]
    pub fn record(&self) -> Option<&Path> {
        self.record.as_deref()
    }
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self::new(EditableStrategy::default())
    }
}

/// Install `metadata` into `output_directory`.
///
/// Returns every entry created. When a record is configured, the same
/// entries are appended to it once the install has succeeded; a failed
/// install leaves the record untouched.
///
/// # Errors
///
/// Selection errors from [`InstallerRegistry::select`], operation and I/O
/// errors from the chosen method, and path errors from the record writer.
pub fn install(
    registry: &InstallerRegistry,
    output_directory: &Path,
    metadata: &EditableMetadata,
    options: &InstallOptions,
) -> Result<Vec<PathBuf>> {
    let method = registry.select(
        output_directory,
        options.strategy,
        &options.installer_labels(),
    )?;
    let installer = Installer::new(method, output_directory, metadata, options.strategy)?;
    let created = installer.install()?;

    if let Some(record) = options.record() {
        log::debug!(
            "recording {} entr(ies) in {}",
            created.len(),
            record.display()
        );
        append_to_record(output_directory, record, &created)?;
    }

    Ok(created)
}

/// [`install`] against the process-wide built-in registry.
///
/// # Errors
///
/// See [`install`].
pub fn install_default(
    output_directory: &Path,
    metadata: &EditableMetadata,
    options: &InstallOptions,
) -> Result<Vec<PathBuf>> {
    install(InstallerRegistry::global(), output_directory, metadata, options)
}

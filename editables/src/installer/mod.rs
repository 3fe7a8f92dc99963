//! Installer variants and the machinery that picks one.
//!
//! # Architecture
//!
//! Each installation method implements [`InstallMethod`]: it declares a
//! label, a priority, the strategies it supports and a capability check,
//! and knows how to perform an install. Methods are registered in an
//! [`InstallerRegistry`] ordered by priority. For every install call the
//! registry selects the first method that supports the requested strategy
//! and is capable for the output directory, and wraps it in a one-shot
//! [`Installer`].
//!
//! Built-in methods, in registry order:
//!
//! | label        | priority | strategies    | capable when                |
//! |--------------|----------|---------------|-----------------------------|
//! | `symlink`    | 0        | lax, strict   | links can be created        |
//! | `redirector` | 10       | lax           | runtime payload is bundled  |
//! | `pth_file`   | 20       | lax           | always                      |
//!
//! # Examples
//!
//! ```no_run
//! use editables::installer::{install, InstallOptions, InstallerRegistry};
//! use editables::{EditableMetadata, EditableStrategy, PathMapping};
//! use std::path::Path;
//!
//! let mapping = PathMapping::from_pairs([("foo/__init__.py", "/work/src/foo/__init__.py")]).unwrap();
//! let options = InstallOptions::new(EditableStrategy::Lax).with_installer("pth_file");
//!
//! let created = install(
//!     InstallerRegistry::global(),
//!     Path::new("/venv/lib/python3.12/site-packages"),
//!     &EditableMetadata::new(mapping),
//!     &options,
//! )
//! .unwrap();
//! ```

pub mod pth;
pub mod redirector;
pub mod registry;
pub mod select;
pub mod symlink;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::metadata::EditableMetadata;
use crate::strategy::EditableStrategy;

pub use pth::PthFileInstaller;
pub use redirector::RedirectorInstaller;
pub use registry::InstallerRegistry;
pub use select::{install, install_default, InstallOptions};
pub use symlink::SymlinkInstaller;

/// Everything an install method needs for one install call.
#[derive(Debug, Clone, Copy)]
pub struct InstallRequest<'a> {
    /// Directory the environment resolves imports from.
    pub output_directory: &'a Path,
    /// What to install.
    pub metadata: &'a EditableMetadata,
    /// How finely to link.
    pub strategy: EditableStrategy,
}

/// An editable installation method.
///
/// Implementations are stateless descriptors; all per-call state arrives in
/// the [`InstallRequest`].
pub trait InstallMethod: fmt::Debug + Send + Sync {
    /// Unique label used for explicit selection.
    fn label(&self) -> &str;

    /// Registry position; lower is tried first.
    fn priority(&self) -> i32;

    /// Strategies this method can carry out.
    fn supported_strategies(&self) -> &[EditableStrategy];

    /// Whether `strategy` is among the supported strategies.
    fn supports(&self, strategy: EditableStrategy) -> bool {
        self.supported_strategies().contains(&strategy)
    }

    /// Whether the method can work in `output_directory`.
    fn is_capable(&self, _output_directory: &Path) -> bool {
        true
    }

    /// Perform the install and return every entry created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InstallerOperation`] for mappings the method cannot
    /// express, and propagates filesystem errors unchanged.
    fn install(&self, request: &InstallRequest<'_>) -> Result<Vec<PathBuf>>;
}

/// A method bound to one install call.
///
/// Construction validates the strategy against the method's supported set.
///
/// # Examples
///
/// ```
/// use editables::installer::{Installer, PthFileInstaller};
/// use editables::{EditableMetadata, EditableStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let metadata = EditableMetadata::default();
/// let result = Installer::new(
///     Arc::new(PthFileInstaller),
///     Path::new("/tmp"),
///     &metadata,
///     EditableStrategy::Strict,
/// );
/// assert!(result.is_err());
/// ```
#[derive(Debug)]
pub struct Installer<'a> {
    method: Arc<dyn InstallMethod>,
    output_directory: &'a Path,
    metadata: &'a EditableMetadata,
    strategy: EditableStrategy,
}

impl<'a> Installer<'a> {
    /// Bind `method` to an install call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedStrategy`] if the method does not support
    /// `strategy`.
    pub fn new(
        method: Arc<dyn InstallMethod>,
        output_directory: &'a Path,
        metadata: &'a EditableMetadata,
        strategy: EditableStrategy,
    ) -> Result<Self> {
        check_strategy(method.as_ref(), strategy)?;
        Ok(Self {
            method,
            output_directory,
            metadata,
            strategy,
        })
    }

    /// Label of the bound method.
    #[must_use]
    pub fn label(&self) -> &str {
        self.method.label()
    }

    /// The strategy this installer will carry out.
    #[must_use]
    pub fn strategy(&self) -> EditableStrategy {
        self.strategy
    }

    /// Change the strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedStrategy`] and leaves the strategy
    /// unchanged if the method does not support `strategy`.
    pub fn set_strategy(&mut self, strategy: EditableStrategy) -> Result<()> {
        check_strategy(self.method.as_ref(), strategy)?;
        self.strategy = strategy;
        Ok(())
    }

    /// Whether the bound method can work in the output directory.
    #[must_use]
    pub fn is_capable(&self) -> bool {
        self.method.is_capable(self.output_directory)
    }

    /// Run the install.
    ///
    /// # Errors
    ///
    /// See [`InstallMethod::install`].
    pub fn install(&self) -> Result<Vec<PathBuf>> {
        log::info!(
            "installing {} path(s) into {} with '{}' ({})",
            self.metadata.paths.len(),
            self.output_directory.display(),
            self.label(),
            self.strategy
        );
        self.method.install(&InstallRequest {
            output_directory: self.output_directory,
            metadata: self.metadata,
            strategy: self.strategy,
        })
    }
}

fn check_strategy(method: &dyn InstallMethod, strategy: EditableStrategy) -> Result<()> {
    if method.supports(strategy) {
        Ok(())
    } else {
        Err(Error::UnsupportedStrategy {
            installer: method.label().to_string(),
            strategy,
        })
    }
}

/// Base file name shared by the files one install writes.
///
/// Derived from a digest of `content` so identical installs reuse the same
/// name and different packages in one environment do not collide.
pub(crate) fn unique_base_name(content: &str) -> String {
    let digest = hex::encode(Sha256::digest(content.as_bytes()));
    format!("_editable_{}", &digest[..16])
}

/// Borrow a path as UTF-8, as `.pth` files and Python literals require.
///
/// Line breaks are rejected: each `.pth` line is a search path entry, and a
/// line starting with `import` is executed.
pub(crate) fn path_str(path: &Path) -> Result<&str> {
    let text = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;
    if text.contains(|c: char| matches!(c, '\n' | '\r')) {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "Path contains a line break".to_string(),
        });
    }
    Ok(text)
}

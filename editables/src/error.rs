//! Error types for the editables library.
//!
//! This module provides the error hierarchy for all operations in the
//! editables library, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::strategy::EditableStrategy;

/// Result type alias for operations that may fail with an editables error.
///
/// # Examples
///
/// ```
/// use editables::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the editables library.
#[derive(Debug, Error)]
pub enum Error {
    /// The path mapping is geometrically invalid for the chosen installer.
    ///
    /// Raised mid-install when a source directory name disagrees with the
    /// declared package name, or when a namespace package without a marker
    /// file is handed to the redirector.
    #[error("{message} (target: {target}, source: {})", source_path.display())]
    InstallerOperation {
        /// Description of the failed operation.
        message: String,
        /// The offending target path.
        target: String,
        /// The offending source path.
        source_path: PathBuf,
    },

    /// No registered installer both supports the strategy and is capable.
    #[error("No installer could satisfy strategy '{strategy}'")]
    NoInstaller {
        /// The requested strategy.
        strategy: EditableStrategy,
    },

    /// An installer was constructed with a strategy it does not support.
    #[error("Unsupported strategy '{strategy}' for installer '{installer}'")]
    UnsupportedStrategy {
        /// Label of the installer.
        installer: String,
        /// The rejected strategy.
        strategy: EditableStrategy,
    },

    /// An installer with the same label is already registered.
    #[error("installer '{label}' is already registered")]
    DuplicateInstaller {
        /// The duplicated label.
        label: String,
    },

    /// No installer with the given label is registered.
    #[error("unknown installer '{label}'")]
    UnknownInstaller {
        /// The unknown label.
        label: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An invalid install-time target path was provided.
    #[error("invalid target '{target}': {reason}")]
    InvalidTarget {
        /// The invalid target.
        target: String,
        /// The reason the target is invalid.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A JSON document could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A wheel archive could not be read or rewritten.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The external package manager failed.
    #[error("package manager command `{command}` failed: {reason}")]
    PackageManager {
        /// The command line that was run.
        command: String,
        /// Why it failed.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::InstallerOperation`].
    pub(crate) fn operation(
        message: impl Into<String>,
        target: impl Into<String>,
        source_path: impl Into<PathBuf>,
    ) -> Self {
        Self::InstallerOperation {
            message: message.into(),
            target: target.into(),
            source_path: source_path.into(),
        }
    }

    /// Check if the error was raised by an installer mid-operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use editables::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::InstallerOperation {
    ///     message: "mismatch".to_string(),
    ///     target: "bar".to_string(),
    ///     source_path: PathBuf::from("/tmp/lib/baz"),
    /// };
    /// assert!(err.is_operation_error());
    /// ```
    #[must_use]
    pub fn is_operation_error(&self) -> bool {
        matches!(self, Self::InstallerOperation { .. })
    }

    /// Check if the error comes from installer selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use editables::{EditableStrategy, Error};
    ///
    /// let err = Error::NoInstaller { strategy: EditableStrategy::Strict };
    /// assert!(err.is_selection_error());
    /// ```
    #[must_use]
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            Self::NoInstaller { .. } | Self::UnsupportedStrategy { .. } | Self::UnknownInstaller { .. }
        )
    }
}

#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # editables
//!
//! A library for editable installation of Python packages.
//!
//! Instead of copying a package's files into an environment's library
//! directory, an editable install makes the environment import straight
//! from the source tree, so edits take effect without reinstalling.
//!
//! ## Core Types
//!
//! - [`PathMapping`] and [`EditableMetadata`]: what to install, as
//!   `target path -> source path` pairs
//! - [`EditableStrategy`]: link whole top-level entities (`lax`) or every
//!   file (`strict`)
//! - [`InstallerRegistry`] and [`install`]: pick an installation method and
//!   run it
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use editables::{install, EditableMetadata, EditableStrategy, InstallOptions, InstallerRegistry};
//! use editables::PathMapping;
//! use std::path::Path;
//!
//! let mapping = PathMapping::from_pairs([
//!     ("foo/__init__.py", "/work/src/foo/__init__.py"),
//!     ("foo/core.py", "/work/src/foo/core.py"),
//! ])
//! .unwrap();
//!
//! let created = install(
//!     InstallerRegistry::global(),
//!     Path::new("/venv/lib/python3.12/site-packages"),
//!     &EditableMetadata::new(mapping),
//!     &InstallOptions::new(EditableStrategy::Lax),
//! )
//! .unwrap();
//! println!("created {created:?}");
//! ```

pub mod collab;
pub mod config;
pub mod error;
pub mod installer;
pub mod logging;
pub mod metadata;
pub mod path;
pub mod probe;
pub mod record;
pub mod strategy;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use installer::{install, install_default, InstallMethod, InstallOptions, InstallerRegistry};
pub use logging::{init_logger, LogLevel, Logger};
pub use metadata::{EditableMetadata, PathMapping};
pub use record::append_to_record;
pub use strategy::EditableStrategy;

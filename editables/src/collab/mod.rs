//! Collaborators around the installer core.
//!
//! None of these are needed for [`crate::installer::install`] itself; they
//! turn a source tree into a [`crate::PathMapping`], reduce a built wheel to
//! its metadata, and drive the package manager that installs that metadata.

pub mod pip;
pub mod sources;
pub mod wheel;

pub use pip::{record_path, InstalledDistribution, PackageManager, Pip};
pub use sources::{map_directory, scan_sources, slice_pairs};
pub use wheel::{distribution_name, strip_wheel};

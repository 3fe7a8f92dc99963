//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `install`: Install source trees editably into an output directory
//! - `develop`: Build and install with pip, then relink editably
//! - `installers`: List the available installation methods
//! - `probe`: Check whether symlinks can be created in a directory
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod develop;
pub mod install;
pub mod installers;
pub mod probe;

pub use completions::CompletionsCommand;
pub use develop::DevelopCommand;
pub use install::InstallCommand;
pub use installers::InstallersCommand;
pub use probe::ProbeCommand;

//! Package manager invocation.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

use crate::error::{Error, Result};

/// One row of the package manager's installed-distribution listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalledDistribution {
    /// Distribution name as reported by the package manager.
    pub name: String,
    /// Installed version.
    pub version: String,
    /// Directory the distribution was installed into.
    pub location: PathBuf,
}

/// Builds and installs wheels, and reports what is installed.
pub trait PackageManager {
    /// Build a wheel for `spec` (without dependencies) into `wheel_dir` and
    /// return its path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PackageManager`] if the build fails or produces no
    /// wheel.
    fn build_wheel(&self, spec: &str, wheel_dir: &Path) -> Result<PathBuf>;

    /// Install `wheel`, carrying over any extras (`[...]`) from `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PackageManager`] if the install fails.
    fn install_wheel(&self, wheel: &Path, spec: &str) -> Result<()>;

    /// List installed distributions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PackageManager`] if the listing fails and
    /// [`Error::Json`] if it cannot be parsed.
    fn list_installed(&self) -> Result<Vec<InstalledDistribution>>;

    /// Find an installed distribution by name, comparing normalized names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PackageManager`] if the distribution is not
    /// installed, and listing errors.
    fn find_installed(&self, name: &str) -> Result<InstalledDistribution> {
        let wanted = normalize_distribution_name(name);
        self.list_installed()?
            .into_iter()
            .find(|d| normalize_distribution_name(&d.name) == wanted)
            .ok_or_else(|| Error::PackageManager {
                command: "list".to_string(),
                reason: format!("distribution '{name}' is not installed"),
            })
    }
}

/// `pip`, run as a module of a Python interpreter.
#[derive(Debug, Clone)]
pub struct Pip {
    python: PathBuf,
}

impl Pip {
    /// Drive pip through `python`.
    #[must_use]
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// The interpreter pip runs under.
    #[must_use]
    pub fn python(&self) -> &Path {
        &self.python
    }

    fn command(&self, args: &[OsString]) -> (Command, String) {
        let mut command = Command::new(&self.python);
        command.arg("-m").arg("pip").args(args);
        let rendered = std::iter::once(self.python.as_os_str().to_string_lossy().into_owned())
            .chain(["-m".to_string(), "pip".to_string()])
            .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");
        (command, rendered)
    }

    /// Run pip with its output going to our stderr.
    fn run(&self, args: &[OsString]) -> Result<()> {
        let (mut command, rendered) = self.command(args);
        log::info!("running {rendered}");

        let status = command
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::PackageManager {
                command: rendered.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::PackageManager {
                command: rendered,
                reason: format!("exited with {status}"),
            })
        }
    }

    /// Run pip and capture its standard output.
    fn capture(&self, args: &[OsString]) -> Result<Vec<u8>> {
        let (mut command, rendered) = self.command(args);
        log::info!("running {rendered}");

        let output = command
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Error::PackageManager {
                command: rendered.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(Error::PackageManager {
                command: rendered,
                reason: format!("exited with {}", output.status),
            })
        }
    }
}

impl Default for Pip {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl PackageManager for Pip {
    fn build_wheel(&self, spec: &str, wheel_dir: &Path) -> Result<PathBuf> {
        self.run(&[
            "wheel".into(),
            "--no-deps".into(),
            "--wheel-dir".into(),
            wheel_dir.as_os_str().to_owned(),
            spec.into(),
        ])?;
        find_wheel(wheel_dir)
    }

    fn install_wheel(&self, wheel: &Path, spec: &str) -> Result<()> {
        let mut target = wheel.as_os_str().to_owned();
        target.push(extras(spec));
        self.run(&["install".into(), target])
    }

    fn list_installed(&self) -> Result<Vec<InstalledDistribution>> {
        let stdout = self.capture(&[
            "--verbose".into(),
            "list".into(),
            "--format".into(),
            "json".into(),
        ])?;
        parse_listing(&stdout)
    }
}

/// Parse the JSON listing printed by `pip --verbose list --format json`.
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed output.
pub fn parse_listing(json: &[u8]) -> Result<Vec<InstalledDistribution>> {
    Ok(serde_json::from_slice(json)?)
}

/// Path of a distribution's install-receipt ledger.
///
/// # Examples
///
/// ```
/// use editables::collab::record_path;
/// use std::path::Path;
///
/// let record = record_path(Path::new("/venv/site-packages"), "foo_bar", "1.0");
/// assert_eq!(record, Path::new("/venv/site-packages/foo_bar-1.0.dist-info/RECORD"));
/// ```
#[must_use]
pub fn record_path(location: &Path, distribution: &str, version: &str) -> PathBuf {
    location
        .join(format!("{distribution}-{version}.dist-info"))
        .join("RECORD")
}

/// Normalize a distribution name for comparison.
///
/// Lowercases and collapses runs of `-`, `_` and `.` into a single `-`.
#[must_use]
pub fn normalize_distribution_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
            }
            in_separator = true;
        } else {
            normalized.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    normalized
}

/// The extras suffix (`[a,b]`) of a requirement specifier, if any.
fn extras(spec: &str) -> &str {
    spec.find('[').map_or("", |idx| &spec[idx..])
}

fn find_wheel(wheel_dir: &Path) -> Result<PathBuf> {
    let mut wheels: Vec<PathBuf> = fs::read_dir(wheel_dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "whl"))
        .collect();
    wheels.sort();

    wheels.into_iter().next().ok_or_else(|| Error::PackageManager {
        command: "wheel".to_string(),
        reason: format!("no wheel was built in {}", wheel_dir.display()),
    })
}

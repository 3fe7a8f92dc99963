//! Normalisation of user-supplied filesystem paths.
//!
//! Source roots and output directories given on the command line may be
//! relative or start with `~`. Installers need absolute paths, because link
//! targets and `.pth` lines are interpreted relative to nothing at all.
//! Symlinks are never followed here: an output directory reached through a
//! link must stay that way.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` to the home directory.
///
/// `~user` is not supported.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8, the home directory is
/// unknown, or the path uses `~user` syntax.
///
/// # Examples
///
/// ```
/// use editables::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/src")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("src"));
///
/// assert_eq!(expand_tilde(Path::new("/opt/src")).unwrap(), Path::new("/opt/src"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(rest) = path.to_str().and_then(|s| s.strip_prefix('~')) else {
        if path.to_str().is_none() {
            return Err(Error::InvalidPath {
                path: path.to_path_buf(),
                reason: "Path contains invalid UTF-8".to_string(),
            });
        }
        return Ok(path.to_path_buf());
    };

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if rest.is_empty() {
        Ok(home)
    } else if let Some(tail) = rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
        Ok(home.join(tail))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Lexically resolve `.` and `..` in an absolute path.
///
/// # Errors
///
/// Returns an error if `..` would climb above the root.
///
/// # Examples
///
/// ```
/// use editables::path::normalize::resolve_components;
/// use std::path::Path;
///
/// let resolved = resolve_components(Path::new("/work/./pkg/../src")).unwrap();
/// assert_eq!(resolved, Path::new("/work/src"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut resolved = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                resolved.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() || resolved.as_os_str().is_empty() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)"
                            .to_string(),
                    });
                }
            }
        }
    }

    Ok(resolved)
}

/// Make a path absolute without touching the filesystem.
///
/// Expands `~`, joins relative paths onto the current directory, then
/// resolves `.` and `..` lexically.
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory is
/// unavailable, or the path escapes the root.
///
/// # Examples
///
/// ```no_run
/// use editables::path::normalize::normalize;
/// use std::path::Path;
///
/// let site_packages = normalize(Path::new("./.venv/lib/python3.12/site-packages")).unwrap();
/// assert!(site_packages.is_absolute());
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    resolve_components(&absolute)
}

//! Pure path computations shared by the installers.
//!
//! Targets are posix-style relative paths (`foo/bar/__init__.py`); sources
//! are absolute paths on disk. None of these functions touch the filesystem
//! except [`normalize_package_path`], which checks for the package marker.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::metadata::{normalize_target, PathMapping};

/// File that marks a directory as a regular (non-namespace) package.
pub const PACKAGE_MARKER: &str = "__init__.py";

/// Walk a target/source pair up to the target's topmost segment.
///
/// Each segment stripped from the target strips one component from the
/// source, so the returned source is the on-disk entity that represents the
/// whole subtree.
///
/// # Examples
///
/// ```
/// use editables::path::find_outermost_entity;
/// use std::path::Path;
///
/// let (target, source) =
///     find_outermost_entity("foo/bar/__init__.py", Path::new("/src/foo/bar/__init__.py"));
/// assert_eq!(target, "foo");
/// assert_eq!(source, Path::new("/src/foo"));
///
/// let (target, source) = find_outermost_entity("mod.py", Path::new("/src/mod.py"));
/// assert_eq!(target, "mod.py");
/// assert_eq!(source, Path::new("/src/mod.py"));
/// ```
#[must_use]
pub fn find_outermost_entity(target: &str, source: &Path) -> (String, PathBuf) {
    let mut target = normalize_target(target).unwrap_or_else(|_| target.to_string());
    let mut source = source.to_path_buf();

    while let Some(idx) = target.rfind('/') {
        target.truncate(idx);
        if !source.pop() {
            break;
        }
    }

    (target, source)
}

/// Find the directory that must go on the search path for `target` to import.
///
/// The truncated source must end with the truncated target, i.e. the
/// directory (or module file) name on disk must equal the package name at
/// install time.
///
/// # Errors
///
/// Returns [`Error::InstallerOperation`] when the names disagree or the
/// source has no parent.
///
/// # Examples
///
/// ```
/// use editables::path::find_parent_folder;
/// use std::path::Path;
///
/// let parent = find_parent_folder("foo/__init__.py", Path::new("/src/foo/__init__.py")).unwrap();
/// assert_eq!(parent, Path::new("/src"));
///
/// let err = find_parent_folder("bar/__init__.py", Path::new("/tmp/lib/baz/__init__.py"));
/// assert!(err.unwrap_err().is_operation_error());
/// ```
pub fn find_parent_folder(target: &str, source: &Path) -> Result<PathBuf> {
    let (outer_target, outer_source) = find_outermost_entity(target, source);
    check_subpath(&outer_target, &outer_source)?;

    match outer_source.parent() {
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(Error::operation(
            "The source has no parent folder to add to the search path",
            outer_target,
            outer_source,
        )),
    }
}

/// Require that an outermost source is named like its outermost target.
///
/// # Errors
///
/// Returns [`Error::InstallerOperation`] citing the subpath mismatch.
pub fn check_subpath(outer_target: &str, outer_source: &Path) -> Result<()> {
    if outer_source.ends_with(outer_target) {
        return Ok(());
    }
    Err(Error::operation(
        "The target is not a subpath of its source. For packages to be linked by name, \
         the package names in the source tree and the built distribution must match",
        outer_target,
        outer_source,
    ))
}

/// Resolve a source to a concrete loadable file.
///
/// Directories resolve to their package marker, which must exist.
///
/// # Errors
///
/// Returns [`Error::InstallerOperation`] for directories without a marker
/// (implicit namespace packages).
pub fn normalize_package_path(source: &Path) -> Result<PathBuf> {
    if !source.is_dir() {
        return Ok(source.to_path_buf());
    }

    let marker = source.join(PACKAGE_MARKER);
    if marker.is_file() {
        Ok(marker)
    } else {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Err(Error::operation(
            "Implicit namespace packages are not supported by the redirector installer",
            name,
            marker,
        ))
    }
}

/// Derive the top-level import name from an outermost target.
///
/// # Examples
///
/// ```
/// use editables::path::normalize_module_name;
///
/// assert_eq!(normalize_module_name("foo"), "foo");
/// assert_eq!(normalize_module_name("foo.py"), "foo");
/// assert_eq!(normalize_module_name("_speedups.cpython-311-x86_64-linux-gnu.so"), "_speedups");
/// ```
#[must_use]
pub fn normalize_module_name(target: &str) -> &str {
    target.split('.').next().unwrap_or(target)
}

/// Outermost entities of every pair, deduplicated by target.
///
/// First-seen order is preserved.
///
/// # Errors
///
/// Returns [`Error::InstallerOperation`] when two pairs share an outermost
/// target but resolve to different source entities.
pub fn outermost_entities(mapping: &PathMapping) -> Result<Vec<(String, PathBuf)>> {
    let mut entities: Vec<(String, PathBuf)> = Vec::new();

    for (target, source) in mapping.iter() {
        let (outer_target, outer_source) = find_outermost_entity(target, source);
        match entities.iter().find(|(t, _)| *t == outer_target) {
            Some((_, existing)) if *existing == outer_source => {}
            Some((_, existing)) => {
                return Err(Error::operation(
                    format!(
                        "Conflicting source roots for the same top-level entity ({} and {})",
                        existing.display(),
                        outer_source.display()
                    ),
                    outer_target,
                    outer_source,
                ));
            }
            None => entities.push((outer_target, outer_source)),
        }
    }

    Ok(entities)
}

/// Order-preserving deduplication.
pub(crate) fn uniq<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

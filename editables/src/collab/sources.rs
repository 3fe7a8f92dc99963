//! Turning source trees into path mappings.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::metadata::PathMapping;
use crate::path::normalize::normalize;

/// Directory name skipped while scanning.
const BYTECODE_CACHE: &str = "__pycache__";

/// List every file under `path`, skipping bytecode caches.
///
/// A path that is a file yields itself. Entries are sorted by file name
/// within each directory so the result is stable across platforms.
///
/// # Errors
///
/// Propagates errors from walking the tree.
pub fn scan_sources(path: &Path) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != BYTECODE_CACHE);

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| Error::InvalidPath {
            path: e.path().map_or_else(|| path.to_path_buf(), Path::to_path_buf),
            reason: format!("Failed to scan sources: {e}"),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Map every file under `source_root` to the same relative location under
/// `target_root`.
///
/// Sources are made absolute (see [`normalize`]); targets use forward
/// slashes. A file given as
/// `source_root` maps to `target_root` itself.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `source_root` cannot be resolved, and
/// target validation errors from [`PathMapping::insert`].
///
/// # Examples
///
/// ```
/// use editables::collab::map_directory;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::create_dir(dir.path().join("pkg")).unwrap();
/// std::fs::write(dir.path().join("pkg/__init__.py"), "").unwrap();
///
/// let mapping = map_directory(&dir.path().join("pkg"), "pkg").unwrap();
/// let targets: Vec<_> = mapping.targets().collect();
/// assert_eq!(targets, ["pkg/__init__.py"]);
/// ```
pub fn map_directory(source_root: &Path, target_root: &str) -> Result<PathMapping> {
    let source_root = normalize(source_root)?;
    let target_root = target_root.trim_end_matches('/');

    let mut mapping = PathMapping::new();
    for file in scan_sources(&source_root)? {
        let relative = file
            .strip_prefix(&source_root)
            .map_err(|_| Error::InvalidPath {
                path: file.clone(),
                reason: format!("Not under {}", source_root.display()),
            })?;
        let target = join_posix(target_root, relative)?;
        mapping.insert(&target, file)?;
    }

    log::debug!(
        "mapped {} file(s) from {} to '{target_root}'",
        mapping.len(),
        source_root.display()
    );
    Ok(mapping)
}

/// Split a flat `SOURCE TARGET SOURCE TARGET ...` list into pairs.
///
/// # Errors
///
/// Returns [`Error::Validation`] for an odd number of items.
///
/// # Examples
///
/// ```
/// use editables::collab::slice_pairs;
///
/// let pairs = slice_pairs(&["src/foo", "foo", "bar.py", "bar.py"]).unwrap();
/// assert_eq!(pairs, [("src/foo", "foo"), ("bar.py", "bar.py")]);
/// assert!(slice_pairs(&["src/foo"]).is_err());
/// ```
pub fn slice_pairs<T: Clone>(items: &[T]) -> Result<Vec<(T, T)>> {
    if items.len() % 2 != 0 {
        return Err(Error::Validation {
            field: "path_pairs".to_string(),
            message: format!("Expected pairs of paths, got {} item(s)", items.len()),
        });
    }
    Ok(items
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect())
}

fn join_posix(root: &str, relative: &Path) -> Result<String> {
    let mut parts: Vec<&str> = Vec::new();
    if !root.is_empty() {
        parts.push(root);
    }
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            parts.push(segment.to_str().ok_or_else(|| Error::InvalidPath {
                path: relative.to_path_buf(),
                reason: "Path contains invalid UTF-8".to_string(),
            })?);
        }
    }
    Ok(parts.join("/"))
}

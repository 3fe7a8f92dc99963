//! Symlink capability detection.
//!
//! Whether links can be created depends on the filesystem (and on Windows,
//! on privileges), so the probe runs inside the output directory itself
//! rather than a generic temp location. Results are cached per output
//! directory for the lifetime of the process.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use once_cell::sync::Lazy;

/// Prefix of the throwaway directory created by the probe.
const PROBE_PREFIX: &str = "_editables-symlink-probe";

/// Probe results keyed by output directory (canonicalised when it exists).
///
/// Guarded by a mutex so callers on different threads observe one answer per
/// directory; the answer itself is never invalidated except by
/// [`clear_cache`].
static SYMLINK_CACHE: Lazy<Mutex<HashMap<PathBuf, bool>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Create a symbolic link at `link` pointing to `source`.
///
/// # Errors
///
/// Returns the underlying I/O error, e.g. when `link` already exists.
#[cfg(unix)]
pub fn symlink(source: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

/// Create a symbolic link at `link` pointing to `source`.
///
/// # Errors
///
/// Returns the underlying I/O error, e.g. when `link` already exists or the
/// process lacks the privilege to create links.
#[cfg(windows)]
pub fn symlink(source: &Path, link: &Path) -> io::Result<()> {
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, link)
    } else {
        std::os::windows::fs::symlink_file(source, link)
    }
}

/// Create a symbolic link at `link` pointing to `source`.
///
/// # Errors
///
/// Always fails on platforms without symlink support.
#[cfg(not(any(unix, windows)))]
pub fn symlink(_source: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}

/// Report whether symbolic links can be created inside `output_directory`.
///
/// # Examples
///
/// ```no_run
/// use editables::probe::can_symlink;
/// use std::path::Path;
///
/// if can_symlink(Path::new("/venv/lib/python3.12/site-packages")) {
///     println!("symlink installs are available");
/// }
/// ```
pub fn can_symlink(output_directory: &Path) -> bool {
    let key = cache_key(output_directory);

    let mut cache = SYMLINK_CACHE
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(&cached) = cache.get(&key) {
        return cached;
    }

    let capable = probe_symlink(output_directory);
    log::debug!(
        "symlink probe for {}: {}",
        output_directory.display(),
        if capable { "supported" } else { "unsupported" }
    );
    cache.insert(key, capable);
    capable
}

/// Forget every cached probe result.
pub fn clear_cache() {
    SYMLINK_CACHE
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clear();
}

fn cache_key(output_directory: &Path) -> PathBuf {
    output_directory
        .canonicalize()
        .unwrap_or_else(|_| output_directory.to_path_buf())
}

fn probe_symlink(output_directory: &Path) -> bool {
    let probe_dir = match tempfile::Builder::new()
        .prefix(PROBE_PREFIX)
        .tempdir_in(output_directory)
    {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "cannot create symlink probe in {}: {e}",
                output_directory.display()
            );
            return false;
        }
    };

    let source = probe_dir.path().join("source");
    let link = probe_dir.path().join("link");
    symlink(&source, &link).is_ok()
}

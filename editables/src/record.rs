//! Install-receipt ledger writer.
//!
//! A distribution's `RECORD` lists every file it owns, one per line, as
//! `path,hash,size`. Entries for editable links carry neither hash nor size.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Append `files` to the ledger at `record_path`.
///
/// Each file is written relative to `output_directory` with forward
/// slashes, followed by two empty fields. The ledger is created if missing.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if a file is not inside
/// `output_directory` (nothing is written in that case) and propagates I/O
/// errors.
///
/// # Examples
///
/// ```
/// use editables::record::append_to_record;
/// use std::path::Path;
///
/// let dir = tempfile::tempdir().unwrap();
/// let record = dir.path().join("RECORD");
/// append_to_record(dir.path(), &record, &[dir.path().join("foo/bar.py")]).unwrap();
/// assert_eq!(std::fs::read_to_string(record).unwrap(), "foo/bar.py,,\n");
/// ```
pub fn append_to_record(
    output_directory: &Path,
    record_path: &Path,
    files: &[PathBuf],
) -> Result<()> {
    let lines = files
        .iter()
        .map(|file| record_line(output_directory, file))
        .collect::<Result<Vec<_>>>()?;

    let mut ledger = OpenOptions::new()
        .create(true)
        .append(true)
        .open(record_path)?;
    for line in &lines {
        ledger.write_all(line.as_bytes())?;
    }
    ledger.flush()?;
    Ok(())
}

fn record_line(output_directory: &Path, file: &Path) -> Result<String> {
    let relative = file
        .strip_prefix(output_directory)
        .map_err(|_| Error::InvalidPath {
            path: file.to_path_buf(),
            reason: format!("Not inside {}", output_directory.display()),
        })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                segments.push(segment.to_str().ok_or_else(|| Error::InvalidPath {
                    path: file.to_path_buf(),
                    reason: "Path contains invalid UTF-8".to_string(),
                })?);
            }
            Component::CurDir => {}
            _ => {
                return Err(Error::InvalidPath {
                    path: file.to_path_buf(),
                    reason: format!("Not inside {}", output_directory.display()),
                })
            }
        }
    }

    if segments.is_empty() {
        return Err(Error::InvalidPath {
            path: file.to_path_buf(),
            reason: "The output directory itself cannot be recorded".to_string(),
        });
    }
    Ok(format!("{},,\n", segments.join("/")))
}

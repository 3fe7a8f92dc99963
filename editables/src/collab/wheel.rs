//! Reducing a built wheel to its metadata.
//!
//! An editable install still goes through the package manager so that the
//! distribution is registered in the environment, but the code payload is
//! replaced by links, `.pth` entries or redirections. Stripping the wheel
//! leaves only the `.dist-info` and `.data` directories behind.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Error, Result};

const METADATA_SUFFIXES: [&str; 2] = [".data", ".dist-info"];
const RECORD_FILE: &str = "RECORD";

struct Entry {
    name: String,
    contents: Option<Vec<u8>>,
}

/// Rewrite the wheel at `wheel_path` in place, keeping only metadata.
///
/// Entries survive when their top-level directory ends in `.data` or
/// `.dist-info`. `RECORD` files are filtered the same way so the package
/// manager does not expect the removed files. Returns the names of the
/// kept entries in archive order.
///
/// The new archive is written next to the old one and moved over it, so a
/// failure leaves the original wheel intact.
///
/// # Errors
///
/// Returns [`Error::Archive`] for unreadable archives, [`Error::Validation`]
/// for a `RECORD` that is not UTF-8, and propagates I/O errors.
pub fn strip_wheel(wheel_path: &Path) -> Result<Vec<String>> {
    let entries = read_metadata_entries(wheel_path)?;

    let directory = wheel_path.parent().unwrap_or_else(|| Path::new("."));
    let mut writer = ZipWriter::new(NamedTempFile::new_in(directory)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in &entries {
        match &entry.contents {
            None => writer.add_directory(entry.name.as_str(), options)?,
            Some(contents) => {
                writer.start_file(entry.name.as_str(), options)?;
                writer.write_all(contents)?;
            }
        }
    }

    let rewritten = writer.finish()?;
    rewritten.persist(wheel_path).map_err(|e| e.error)?;

    log::debug!(
        "stripped {} down to {} metadata entr(ies)",
        wheel_path.display(),
        entries.len()
    );
    Ok(entries.into_iter().map(|e| e.name).collect())
}

fn read_metadata_entries(wheel_path: &Path) -> Result<Vec<Entry>> {
    let mut archive = ZipArchive::new(BufReader::new(File::open(wheel_path)?))?;
    let mut entries = Vec::new();

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let name = file.name().to_string();
        if !is_metadata_path(&name) {
            continue;
        }

        if file.is_dir() {
            entries.push(Entry {
                name,
                contents: None,
            });
            continue;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        if name.rsplit('/').next() == Some(RECORD_FILE) {
            contents = filter_record(&name, contents)?;
        }
        entries.push(Entry {
            name,
            contents: Some(contents),
        });
    }

    Ok(entries)
}

fn is_metadata_path(path: &str) -> bool {
    let head = path.split('/').next().unwrap_or(path);
    METADATA_SUFFIXES.iter().any(|suffix| head.ends_with(suffix))
}

fn filter_record(name: &str, contents: Vec<u8>) -> Result<Vec<u8>> {
    let text = String::from_utf8(contents).map_err(|e| Error::Validation {
        field: name.to_string(),
        message: format!("RECORD is not valid UTF-8: {e}"),
    })?;

    let mut filtered = String::with_capacity(text.len());
    for line in text.lines() {
        let path = line.split(',').next().unwrap_or(line);
        if is_metadata_path(path) {
            filtered.push_str(line);
            filtered.push('\n');
        }
    }
    Ok(filtered.into_bytes())
}

/// The distribution name encoded in a wheel file name.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the path has no UTF-8 file name.
///
/// # Examples
///
/// ```
/// use editables::collab::distribution_name;
/// use std::path::Path;
///
/// let name = distribution_name(Path::new("/tmp/foo_bar-1.0-py3-none-any.whl")).unwrap();
/// assert_eq!(name, "foo_bar");
/// ```
pub fn distribution_name(wheel_path: &Path) -> Result<String> {
    let file_name = wheel_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidPath {
            path: wheel_path.to_path_buf(),
            reason: "Wheel path has no file name".to_string(),
        })?;
    Ok(file_name
        .split('-')
        .next()
        .unwrap_or(file_name)
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const RECORD: &str = "foo/__init__.py,sha256=abc,10\n\
                          foo/core.py,sha256=def,20\n\
                          foo-1.0.data/scripts/foo,sha256=ghi,30\n\
                          foo-1.0.dist-info/METADATA,sha256=jkl,40\n\
                          foo-1.0.dist-info/RECORD,,\n";

    fn build_wheel(dir: &Path) -> PathBuf {
        let path = dir.join("foo-1.0-py3-none-any.whl");
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        let options = SimpleFileOptions::default();
        for (name, contents) in [
            ("foo/__init__.py", ""),
            ("foo/core.py", "x = 1\n"),
            ("foo-1.0.data/scripts/foo", "#!python\n"),
            ("foo-1.0.dist-info/METADATA", "Name: foo\nVersion: 1.0\n"),
            ("foo-1.0.dist-info/RECORD", RECORD),
        ] {
            writer.start_file(name, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    fn read_entry(wheel: &Path, name: &str) -> String {
        let mut archive = ZipArchive::new(File::open(wheel).unwrap()).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        contents
    }

    #[test]
    fn test_strip_keeps_metadata_only() {
        let dir = TempDir::new().unwrap();
        let wheel = build_wheel(dir.path());

        let kept = strip_wheel(&wheel).unwrap();
        assert_eq!(
            kept,
            [
                "foo-1.0.data/scripts/foo",
                "foo-1.0.dist-info/METADATA",
                "foo-1.0.dist-info/RECORD",
            ]
        );

        let archive = ZipArchive::new(File::open(&wheel).unwrap()).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        assert_eq!(names.len(), 3);
        assert!(!names.contains(&"foo/core.py"));
        assert_eq!(read_entry(&wheel, "foo-1.0.data/scripts/foo"), "#!python\n");
    }

    #[test]
    fn test_strip_filters_record() {
        let dir = TempDir::new().unwrap();
        let wheel = build_wheel(dir.path());
        strip_wheel(&wheel).unwrap();

        assert_eq!(
            read_entry(&wheel, "foo-1.0.dist-info/RECORD"),
            "foo-1.0.data/scripts/foo,sha256=ghi,30\n\
             foo-1.0.dist-info/METADATA,sha256=jkl,40\n\
             foo-1.0.dist-info/RECORD,,\n"
        );
    }

    #[test]
    fn test_strip_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let wheel = build_wheel(dir.path());
        let first = strip_wheel(&wheel).unwrap();
        let second = strip_wheel(&wheel).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_not_a_zip() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("bogus-1.0-py3-none-any.whl");
        std::fs::write(&bogus, "not a zip").unwrap();

        assert!(matches!(strip_wheel(&bogus), Err(Error::Archive(_))));
        assert_eq!(std::fs::read_to_string(&bogus).unwrap(), "not a zip");
    }

    #[test]
    fn test_metadata_path_matching() {
        assert!(is_metadata_path("foo-1.0.dist-info/METADATA"));
        assert!(is_metadata_path("foo-1.0.data/purelib/x.py"));
        assert!(!is_metadata_path("foo/dist-info.py"));
        assert!(!is_metadata_path("foo.py"));
    }
}

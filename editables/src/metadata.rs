//! Editable distribution metadata.
//!
//! The [`PathMapping`] is the sole payload describing what to install: an
//! ordered map from posix-style install-time target paths to absolute
//! source paths on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Ordered mapping from target paths to source paths.
///
/// Targets are relative posix paths as they would appear inside the
/// installed package layout. Sources are absolute paths. Iteration follows
/// insertion order.
///
/// # Examples
///
/// ```
/// use editables::PathMapping;
///
/// let mut mapping = PathMapping::new();
/// mapping.insert("foo/__init__.py", "/src/foo/__init__.py").unwrap();
/// mapping.insert("./bar.py", "/src/bar.py").unwrap();
///
/// let targets: Vec<_> = mapping.targets().collect();
/// assert_eq!(targets, ["foo/__init__.py", "bar.py"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapping {
    entries: Vec<(String, PathBuf)>,
}

impl PathMapping {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from `(target, source)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if any pair fails [`PathMapping::insert`].
    pub fn from_pairs<I, T, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, S)>,
        T: AsRef<str>,
        S: Into<PathBuf>,
    {
        let mut mapping = Self::new();
        for (target, source) in pairs {
            mapping.insert(target.as_ref(), source)?;
        }
        Ok(mapping)
    }

    /// Add a `target → source` pair.
    ///
    /// The target is normalised first. Re-inserting an identical pair is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the target is empty, absolute, or contains `..`
    /// - the source is not absolute
    /// - the target is already mapped to a different source
    pub fn insert(&mut self, target: &str, source: impl Into<PathBuf>) -> Result<()> {
        let target = normalize_target(target)?;
        let source = source.into();
        if !source.is_absolute() {
            return Err(Error::InvalidPath {
                path: source,
                reason: "source paths must be absolute".to_string(),
            });
        }

        match self.get(&target) {
            Some(existing) if existing == source => Ok(()),
            Some(existing) => Err(Error::InvalidTarget {
                reason: format!(
                    "already mapped to {}, cannot remap to {}",
                    existing.display(),
                    source.display()
                ),
                target,
            }),
            None => {
                self.entries.push((target, source));
                Ok(())
            }
        }
    }

    /// Look up the source mapped to `target`.
    #[must_use]
    pub fn get(&self, target: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, s)| s.as_path())
    }

    /// Iterate over `(target, source)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> + '_ {
        self.entries.iter().map(|(t, s)| (t.as_str(), s.as_path()))
    }

    /// Iterate over targets in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every pair of `other`, with the same validation as `insert`.
    ///
    /// # Errors
    ///
    /// Returns an error if any pair conflicts with an existing one.
    pub fn extend_from(&mut self, other: &PathMapping) -> Result<()> {
        for (target, source) in other.iter() {
            self.insert(target, source)?;
        }
        Ok(())
    }
}

/// Normalise a posix-style target path.
///
/// Strips `.` segments, duplicate and trailing separators.
///
/// # Errors
///
/// Returns [`Error::InvalidTarget`] for empty, absolute, or escaping targets.
///
/// # Examples
///
/// ```
/// use editables::metadata::normalize_target;
///
/// assert_eq!(normalize_target("./foo//bar/").unwrap(), "foo/bar");
/// assert!(normalize_target("/foo").is_err());
/// assert!(normalize_target("foo/../bar").is_err());
/// ```
pub fn normalize_target(target: &str) -> Result<String> {
    let invalid = |reason: &str| Error::InvalidTarget {
        target: target.to_string(),
        reason: reason.to_string(),
    };

    if target.starts_with('/') {
        return Err(invalid("target paths must be relative"));
    }

    let mut segments = Vec::new();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(invalid("target paths must not contain '..'")),
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Err(invalid("target path is empty"));
    }
    Ok(segments.join("/"))
}

impl Serialize for PathMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (target, source) in &self.entries {
            map.serialize_entry(target, source)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PathMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = PathMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of target paths to absolute source paths")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut mapping = PathMapping::new();
                while let Some((target, source)) = access.next_entry::<String, PathBuf>()? {
                    mapping
                        .insert(&target, source)
                        .map_err(serde::de::Error::custom)?;
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

/// Metadata describing one editable installation.
///
/// # Examples
///
/// ```
/// use editables::EditableMetadata;
///
/// let metadata: EditableMetadata = serde_json::from_str(
///     r#"{"paths": {"foo/__init__.py": "/src/foo/__init__.py"}}"#,
/// ).unwrap();
/// assert_eq!(metadata.paths.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditableMetadata {
    /// Target to source mapping.
    pub paths: PathMapping,
}

impl EditableMetadata {
    /// Wrap a mapping.
    #[must_use]
    pub fn new(paths: PathMapping) -> Self {
        Self { paths }
    }

    /// Read metadata from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid metadata.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read metadata file: {e}"),
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl From<PathMapping> for EditableMetadata {
    fn from(paths: PathMapping) -> Self {
        Self::new(paths)
    }
}

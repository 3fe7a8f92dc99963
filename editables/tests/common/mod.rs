//! Common test utilities for integration tests.
//!
//! This module provides source-tree fixtures shaped like real projects and
//! helpers for checking installs with a Python interpreter.

pub mod python;

use std::fs;
use std::path::{Path, PathBuf};

use editables::{EditableMetadata, PathMapping};
use tempfile::TempDir;

/// A named set of `(target, source relative to the input directory)` pairs.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub name: &'static str,
    pub pairs: &'static [(&'static str, &'static str)],
}

/// Every layout exercised by the installer tests.
pub const LAYOUTS: &[Layout] = &[
    Layout {
        name: "single-package",
        pairs: &[("foo/__init__.py", "foo/__init__.py")],
    },
    Layout {
        name: "single-module",
        pairs: &[("foo.py", "foo.py")],
    },
    Layout {
        name: "multiple-package",
        pairs: &[
            ("foo/__init__.py", "foo/__init__.py"),
            ("bar/__init__.py", "bar/__init__.py"),
        ],
    },
    Layout {
        name: "multiple-indirect-package",
        pairs: &[
            ("foo/__init__.py", "foo/__init__.py"),
            ("bar/__init__.py", "lib/baz/__init__.py"),
        ],
    },
    Layout {
        name: "multiple-nested-package",
        pairs: &[
            ("foo/__init__.py", "src/foo/__init__.py"),
            ("bar/baz/__init__.py", "src/bar/baz/__init__.py"),
        ],
    },
    Layout {
        name: "mixed-module-and-package",
        pairs: &[
            ("foo.py", "src/foo.py"),
            ("bar/__init__.py", "bar/__init__.py"),
        ],
    },
    Layout {
        name: "namespace-package-only",
        pairs: &[("foo/bar/__init__.py", "foo/bar/__init__.py")],
    },
];

/// A materialized layout: empty source files under `input/` and an empty
/// `out/` directory to install into.
pub struct Fixture {
    pub layout: Layout,
    pub dir: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
    pub metadata: EditableMetadata,
}

impl Fixture {
    /// Create the source files of `layout` in a fresh temporary directory.
    pub fn new(layout: Layout) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");
        let output = dir.path().join("out");
        fs::create_dir_all(&output).unwrap();

        let mut mapping = PathMapping::new();
        for (target, source) in layout.pairs {
            let source = input.join(source);
            touch(&source);
            mapping.insert(target, source).unwrap();
        }

        Self {
            layout,
            dir,
            input,
            output,
            metadata: EditableMetadata::new(mapping),
        }
    }

    /// Create a `foo-0.0.0.dist-info` directory outside the output
    /// directory and return its `RECORD` path.
    #[allow(dead_code)]
    pub fn dist_info_record(&self) -> PathBuf {
        let dist_info = self.dir.path().join("foo-0.0.0.dist-info");
        fs::create_dir_all(&dist_info).unwrap();
        fs::write(dist_info.join("METADATA"), "Name: foo\n").unwrap();
        let record = dist_info.join("RECORD");
        fs::write(
            &record,
            "foo-0.0.0.dist-info/METADATA,,\nfoo-0.0.0.dist-info/RECORD,,\n",
        )
        .unwrap();
        record
    }

    /// Targets of the layout, in declaration order.
    #[allow(dead_code)]
    pub fn targets(&self) -> Vec<&'static str> {
        self.layout.pairs.iter().map(|(t, _)| *t).collect()
    }
}

/// All layouts except the named ones.
#[allow(dead_code)]
pub fn layouts_except<'a>(names: &'a [&'a str]) -> impl Iterator<Item = Layout> + 'a {
    LAYOUTS
        .iter()
        .copied()
        .filter(move |layout| !names.contains(&layout.name))
}

/// Create an empty file, along with its parent directories.
pub fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

/// Whether `path` itself is a symbolic link.
#[allow(dead_code)]
pub fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Order-preserving deduplication.
#[allow(dead_code)]
pub fn uniq<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

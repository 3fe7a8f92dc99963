//! Integration tests for installer selection and the install entry point.

mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{Fixture, LAYOUTS};
use editables::installer::{
    InstallRequest, Installer, PthFileInstaller, RedirectorInstaller, SymlinkInstaller,
};
use editables::{
    install, EditableMetadata, EditableStrategy, Error, InstallMethod, InstallOptions,
    InstallerRegistry, Result,
};

/// Never capable; counts how often it was asked to install.
#[derive(Debug, Default)]
struct Unavailable {
    installs: AtomicUsize,
}

impl InstallMethod for Unavailable {
    fn label(&self) -> &str {
        "unavailable"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn supported_strategies(&self) -> &[EditableStrategy] {
        &EditableStrategy::ALL
    }

    fn is_capable(&self, _output_directory: &Path) -> bool {
        false
    }

    fn install(&self, _request: &InstallRequest<'_>) -> Result<Vec<PathBuf>> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

#[test]
fn test_incapable_first_entry_falls_back_to_next() {
    let unavailable = Arc::new(Unavailable::default());
    let mut registry = InstallerRegistry::new();
    registry.register(PthFileInstaller).unwrap();
    registry.register(RedirectorInstaller).unwrap();
    registry.register_arc(unavailable.clone()).unwrap();

    let labels: Vec<_> = registry.labels().collect();
    assert_eq!(labels, ["unavailable", "redirector", "pth_file"]);

    let fixture = Fixture::new(LAYOUTS[0]);
    let created = install(
        &registry,
        &fixture.output,
        &fixture.metadata,
        &InstallOptions::new(EditableStrategy::Lax),
    )
    .unwrap();

    assert_eq!(created.len(), 2);
    assert_eq!(unavailable.installs.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_installer_for_strict_without_symlinks() {
    let mut registry = InstallerRegistry::new();
    registry.register(PthFileInstaller).unwrap();
    registry.register(RedirectorInstaller).unwrap();

    let fixture = Fixture::new(LAYOUTS[0]);
    let err = install(
        &registry,
        &fixture.output,
        &fixture.metadata,
        &InstallOptions::new(EditableStrategy::Strict),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "No installer could satisfy strategy 'strict'");
    assert_eq!(fs::read_dir(&fixture.output).unwrap().count(), 0);
}

#[test]
fn test_builtin_registry_rejects_reregistration() {
    let mut registry = InstallerRegistry::builtin();
    let err = registry.register(SymlinkInstaller).unwrap_err();
    assert!(matches!(err, Error::DuplicateInstaller { ref label } if label == "symlink"));
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_unknown_explicit_installer() {
    let fixture = Fixture::new(LAYOUTS[0]);
    let err = install(
        InstallerRegistry::global(),
        &fixture.output,
        &fixture.metadata,
        &InstallOptions::new(EditableStrategy::Lax).with_installer("copy"),
    )
    .unwrap_err();
    assert!(err.is_selection_error());
    assert!(matches!(err, Error::UnknownInstaller { .. }));
}

#[test]
fn test_installer_construction_validates_strategy() {
    let metadata = EditableMetadata::default();
    let err = Installer::new(
        Arc::new(RedirectorInstaller),
        Path::new("/out"),
        &metadata,
        EditableStrategy::Strict,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedStrategy {
            ref installer,
            strategy: EditableStrategy::Strict,
        } if installer == "redirector"
    ));
}

#[test]
fn test_metadata_from_json_file() {
    let fixture = Fixture::new(LAYOUTS[0]);
    let source = fixture.input.join("foo/__init__.py");
    let json = serde_json::json!({ "paths": { "foo/__init__.py": source } });
    let metadata_file = fixture.dir.path().join("metadata.json");
    fs::write(&metadata_file, serde_json::to_vec(&json).unwrap()).unwrap();

    let metadata = EditableMetadata::from_json_file(&metadata_file).unwrap();
    assert_eq!(metadata, fixture.metadata);

    let created = install(
        InstallerRegistry::global(),
        &fixture.output,
        &metadata,
        &InstallOptions::new(EditableStrategy::Lax).with_installer("pth_file"),
    )
    .unwrap();
    assert_eq!(created.len(), 1);
}

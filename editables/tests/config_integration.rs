//! Integration tests for the configuration system.
//!
//! Tests that modify environment variables are marked with `#[serial]` so
//! they run sequentially.

mod common;

use std::env;
use std::fs;
use std::path::Path;

use common::{Fixture, LAYOUTS};
use editables::config::loader::{LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE};
use editables::config::{Config, ConfigBuilder};
use editables::{install, EditableStrategy, Error, InstallerRegistry};
use serial_test::serial;
use tempfile::TempDir;

fn build(project: &Path, user: &Path) -> editables::Result<Config> {
    ConfigBuilder::new()
        .with_working_dir(project)
        .with_config_dir(user)
        .skip_env()
        .build()
}

#[test]
fn test_project_config_drives_install() {
    let project = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    let fixture = Fixture::new(LAYOUTS[0]);
    let record = fixture.dist_info_record();

    fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        format!(
            "strategy: lax\ninstaller: pth_file\nrecord: {}\n",
            record.display()
        ),
    )
    .unwrap();

    let config = build(project.path(), user.path()).unwrap();
    let created = install(
        InstallerRegistry::global(),
        &fixture.output,
        &fixture.metadata,
        &config.install_options(),
    )
    .unwrap();

    let name = created[0].file_name().unwrap().to_str().unwrap();
    assert!(fs::read_to_string(&record)
        .unwrap()
        .ends_with(&format!("{name},,\n")));
}

#[test]
fn test_local_file_overrides_project_file() {
    let project = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    let nested = project.path().join("a/b");
    fs::create_dir_all(&nested).unwrap();

    fs::write(user.path().join("config.yaml"), "strategy: strict\n").unwrap();
    fs::write(project.path().join(PROJECT_CONFIG_FILE), "installer: redirector\n").unwrap();
    fs::write(project.path().join(LOCAL_CONFIG_FILE), "installer: symlink\n").unwrap();

    let config = build(&nested, user.path()).unwrap();
    assert_eq!(config.strategy, Some(EditableStrategy::Strict));
    assert_eq!(config.installer_labels(), ["symlink"]);
}

#[test]
fn test_incompatible_layers_fail_validation() {
    let project = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::write(user.path().join("config.yaml"), "strategy: strict\n").unwrap();
    fs::write(project.path().join(PROJECT_CONFIG_FILE), "installer: pth_file\n").unwrap();

    let err = build(project.path(), user.path()).unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "installer"));
}

#[test]
fn test_unknown_key_is_a_configuration_error() {
    let project = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::write(project.path().join(PROJECT_CONFIG_FILE), "method: symlink\n").unwrap();

    let err = build(project.path(), user.path()).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
#[serial]
fn test_environment_overrides_files() {
    let project = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::write(project.path().join(PROJECT_CONFIG_FILE), "strategy: lax\n").unwrap();

    let saved = env::var("EDITABLES_STRATEGY").ok();
    env::set_var("EDITABLES_STRATEGY", "strict");
    let result = ConfigBuilder::new()
        .with_working_dir(project.path())
        .with_config_dir(user.path())
        .build();
    match saved {
        Some(v) => env::set_var("EDITABLES_STRATEGY", v),
        None => env::remove_var("EDITABLES_STRATEGY"),
    }

    assert_eq!(result.unwrap().strategy, Some(EditableStrategy::Strict));
}

#[test]
fn test_installer_chain_from_project_file() {
    let project = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    let fixture = Fixture::new(LAYOUTS[0]);
    fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "installer:\n  - pth_file\n  - redirector\n",
    )
    .unwrap();

    let config = build(project.path(), user.path()).unwrap();
    assert_eq!(config.installer_labels(), ["pth_file", "redirector"]);

    let created = install(
        InstallerRegistry::global(),
        &fixture.output,
        &fixture.metadata,
        &config.install_options(),
    )
    .unwrap();
    assert_eq!(created.len(), 1);
    assert!(created[0].extension().is_some_and(|ext| ext == "pth"));
}

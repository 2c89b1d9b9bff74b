//! Integration tests for Settings loading from an explicit config file.
//!
//! Note: these tests assume no TREEKIT_* variables are set; environment
//! overrides are covered in config_env_test.rs, which runs as its own binary.

use std::fs;

use rstest::rstest;
use tempfile::TempDir;

use treekit::application::ApplicationError;
use treekit::config::Settings;
use treekit::domain::TreeKind;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("treekit.toml");
    fs::write(&path, content).unwrap();
    path
}

#[rstest]
fn given_explicit_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "default_kind = \"general\"\nmax_depth = 12\n");

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.default_kind, TreeKind::General);
    assert_eq!(settings.max_depth, 12);
}

#[rstest]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[rstest]
#[case("max_depth = 0\n")]
#[case("max_depth = \"deep\"\n")]
#[case("default_kind = \"ternary\"\n")]
fn given_invalid_config_when_load_then_config_error(#[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, content);

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }), "got {err:?}");
}

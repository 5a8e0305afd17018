#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviesearch");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("lookup"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_path_uses_dir() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviesearch");
    cmd.args(["config", "path", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let mut init = cargo_bin_cmd!("moviesearch");
    init.args(["config", "init", "--dir"])
        .arg(dir.path())
        .assert()
        .success();

    // Assert
    assert!(dir.path().join("config.toml").exists());
    let mut show = cargo_bin_cmd!("moviesearch");
    show.args(["config", "show", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout_secs = 10"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[omdb]\n").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviesearch");
    cmd.args(["config", "init", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_show_masks_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[omdb]\napi_key = \"secret-key\"\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviesearch");
    cmd.args(["config", "show", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("secret-key").not());
}

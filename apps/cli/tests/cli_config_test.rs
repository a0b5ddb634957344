//! Integration tests for `cmdboard-cli config` and `resolve`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cmdboard-cli").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env_remove("CMDBOARD_DATA_DIR");
    cmd
}

#[test]
fn test_config_show_defaults() {
    let home = TempDir::new().unwrap();
    let output = cli(&home).args(["config", "show", "--json"]).output().unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["global_hotkeys"], true);
    assert_eq!(config["files"]["commands"], "commands.txt");
}

#[test]
fn test_local_config_overrides_global() {
    let home = TempDir::new().unwrap();
    fs::create_dir_all(home.path().join(".cmdboard")).unwrap();
    let global = "terminal = \"xterm\"\nlog_level = \"error\"\n";
    fs::write(home.path().join(".cmdboard").join("config.toml"), global).unwrap();
    fs::write(home.path().join(".cmdboardrc"), "terminal = \"kitty\"\n").unwrap();

    cli(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("terminal = \"kitty\""))
        .stdout(predicate::str::contains("log_level = \"error\""));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    cli(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join(".cmdboardrc").exists());

    cli(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    cli(&home).args(["config", "init", "--force"]).assert().success();
}

#[test]
fn test_config_path_reports_data_dir() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("data");
    cli(&home)
        .arg("--data-dir")
        .arg(&data)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(data.join("commands.txt").display().to_string()));
}

#[cfg(unix)]
#[test]
fn test_resolve_uses_path() {
    let home = TempDir::new().unwrap();
    let bin = home.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    fs::write(bin.join("frobnicate"), "").unwrap();

    cli(&home)
        .env("PATH", &bin)
        .args(["resolve", "frobnicate", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("\"{}\" --all", bin.join("frobnicate").display())));
}

#[test]
fn test_resolve_unknown_command_is_unchanged() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["resolve", "doesnotexist123", "arg"])
        .assert()
        .success()
        .stdout(predicate::str::diff("doesnotexist123 arg\n"));
}

//! End-to-end tests for the twinpack binary and command functions.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;
use twinpack_cli::cli::{ConfigArgs, Mode, Variant};
use twinpack_cli::commands;

const PACKAGE_JSON: &str = r#"{
    "name": "acme-site",
    "description": "Marketing site",
    "author": "Jane Doe <jane@example.com> (https://example.com)"
}"#;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.json"), PACKAGE_JSON).unwrap();
    fs::write(
        temp.path().join("twinpack.toml"),
        r#"
name = "Acme"
copyright = "Acme Inc."

[urls]
public_path = "/assets/"

[compression]
threshold = 64
"#,
    )
    .unwrap();
    temp
}

fn twinpack(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("twinpack").unwrap();
    cmd.current_dir(root).arg("--no-color");
    for var in [
        "PUBLIC_PATH",
        "DEV_SERVER_PUBLIC",
        "DEV_SERVER_HOST",
        "DEV_SERVER_PORT",
        "DEV_SERVER_POLL",
        "DEV_SERVER_HTTPS",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_config_prints_legacy_then_modern() {
    let temp = project();
    let json = stdout_json(twinpack(temp.path()).args(["config", "--mode", "production"]));

    let configs = json.as_array().unwrap();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0]["variant"], "legacy");
    assert_eq!(configs[1]["variant"], "modern");
    assert_eq!(configs[0]["config"]["mode"], "production");
    assert_eq!(
        configs[0]["config"]["output"]["filename"],
        "js/[name]-legacy.[chunkhash].js"
    );
    assert_eq!(
        configs[1]["config"]["output"]["filename"],
        "js/[name].[chunkhash].js"
    );
    assert_eq!(configs[1]["config"]["output"]["publicPath"], "/assets/");
}

#[test]
fn test_config_variant_filter() {
    let temp = project();
    let json = stdout_json(twinpack(temp.path()).args(["config", "--variant", "modern"]));

    let configs = json.as_array().unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0]["variant"], "modern");
    assert_eq!(configs[0]["config"]["mode"], "development");
    assert!(configs[0]["config"]["devServer"].is_object());
}

#[test]
fn test_dev_server_env_reaches_config() {
    let temp = project();
    let json = stdout_json(
        twinpack(temp.path())
            .env("DEV_SERVER_PUBLIC", "http://192.168.1.10:3000")
            .env("DEV_SERVER_PORT", "3000")
            .args(["config", "--variant", "legacy"]),
    );

    let config = &json[0]["config"];
    assert_eq!(config["output"]["publicPath"], "http://192.168.1.10:3000/");
    assert_eq!(config["devServer"]["port"], "3000");
}

#[test]
fn test_settings_reports_env_overrides() {
    let temp = project();
    let json = stdout_json(
        twinpack(temp.path())
            .env("PUBLIC_PATH", "https://cdn.example.com/")
            .arg("settings"),
    );

    assert_eq!(json["settings"]["urls"]["public_path"], "/assets/");
    assert_eq!(json["resolved"]["publicPath"], "https://cdn.example.com/");
    assert_eq!(json["resolved"]["devServer"]["port"], "8080");
    assert_eq!(json["package"]["name"], "acme-site");
    assert_eq!(json["package"]["author"]["email"], "jane@example.com");
}

#[test]
fn test_compress_writes_gzip_siblings() {
    let temp = project();
    let dist = temp.path().join("dist");
    fs::create_dir_all(dist.join("js")).unwrap();
    fs::write(dist.join("js/app.js"), "console.log('hello');\n".repeat(200)).unwrap();
    fs::write(dist.join("js/tiny.js"), "1;").unwrap();
    fs::write(dist.join("logo.png"), vec![0u8; 4096]).unwrap();

    twinpack(temp.path())
        .args(["compress", "dist"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Compressed 1 file(s)"));

    assert!(dist.join("js/app.js.gz").is_file());
    assert!(!dist.join("js/tiny.js.gz").exists());
    assert!(!dist.join("logo.png.gz").exists());
}

#[test]
fn test_compress_missing_dir_fails() {
    let temp = project();
    twinpack(temp.path())
        .args(["compress", "no-such-dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-dir"));
}

#[test]
fn test_missing_root_fails() {
    let temp = project();
    twinpack(temp.path())
        .args(["config", "--root", "does/not/exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does/not/exist"));
}

#[test]
fn test_invalid_settings_file_fails() {
    let temp = project();
    fs::write(temp.path().join("twinpack.toml"), "[urls\npublic_path = 1").unwrap();
    twinpack(temp.path())
        .arg("settings")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_execute_writes_output_file() {
    let temp = project();
    let out = temp.path().join("configs.json");

    commands::config_execute(ConfigArgs {
        mode: Mode::Production,
        variant: Some(Variant::Legacy),
        root: temp.path().to_path_buf(),
        output: Some(out.clone()),
    })
    .unwrap();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let configs = json.as_array().unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0]["variant"], "legacy");

    let plugins = configs[0]["config"]["plugins"].as_array().unwrap();
    assert!(!plugins.is_empty());
}

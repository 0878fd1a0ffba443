use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let output = Command::cargo_bin("shelf")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("config"));
}

#[test]
fn config_prints_resolved_settings() {
    let output = Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_ENV", "staging")
        .env("SHELF_CONFIG_DIR", std::env::temp_dir().join("shelf-cli-no-config"))
        .arg("config")
        .output()
        .unwrap();

    assert!(output.status.success());
    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["environment"], "staging");
    assert_eq!(settings["pagination"]["default_size"], 5);
}

#[test]
fn unknown_environment_fails() {
    Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_ENV", "qa")
        .arg("config")
        .assert()
        .failure();
}

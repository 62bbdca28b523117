#![allow(clippy::unwrap_used)]
// CLI smoke tests. Everything here must fail (or finish) before any
// network call, so no device and no mock server is involved.

use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;

/// A command isolated from the user's real config and environment.
fn phonectl(config_home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("phonectl").unwrap();
    cmd.env_remove("PHONECTL_PROFILE")
        .env_remove("PHONECTL_LOGIN")
        .env_remove("PHONECTL_SCHEME")
        .env_remove("PHONECTL_TIMEOUT")
        .env("HOME", config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path().join(".config"));
    cmd
}

#[test]
fn help_lists_the_fleet_commands() {
    let home = tempfile::tempdir().unwrap();
    phonectl(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            contains("scan")
                .and(contains("phonebook"))
                .and(contains("backup"))
                .and(contains("reset")),
        );
}

#[test]
fn scan_without_addresses_is_a_usage_error() {
    let home = tempfile::tempdir().unwrap();
    phonectl(&home)
        .arg("scan")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("No device addresses"));
}

#[test]
fn upload_missing_file_fails_before_network() {
    // The address points at a port nothing listens on; if the CLI tried to
    // contact it the error text would be a connection failure, not a local
    // read failure.
    let home = tempfile::tempdir().unwrap();
    phonectl(&home)
        .env("TEST_PHONE_PW", "pw")
        .args([
            "-a",
            "127.0.0.1:1",
            "--login",
            "admin",
            "--password-env",
            "TEST_PHONE_PW",
            "phonebook",
            "upload",
            "/definitely/not/here/LocalPhonebook.xml",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Cannot read"));
}

#[test]
fn restore_with_missing_backup_fails_before_confirmation() {
    let home = tempfile::tempdir().unwrap();
    phonectl(&home)
        .env("TEST_PHONE_PW", "pw")
        .args([
            "-a",
            "127.0.0.1:1",
            "--login",
            "admin",
            "--password-env",
            "TEST_PHONE_PW",
            "restore",
            "/definitely/not/here/AllSettings.cfg",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Cannot read"));
}

#[test]
fn missing_password_env_is_an_auth_error() {
    let home = tempfile::tempdir().unwrap();
    phonectl(&home)
        .env_remove("NO_SUCH_VAR_FOR_PHONECTL")
        .args([
            "-a",
            "127.0.0.1:1",
            "--login",
            "admin",
            "--password-env",
            "NO_SUCH_VAR_FOR_PHONECTL",
            "scan",
        ])
        .assert()
        .failure()
        .code(3)
        .stderr(contains("NO_SUCH_VAR_FOR_PHONECTL"));
}

#[test]
fn bad_parameters_document_fails_before_network() {
    let home = tempfile::tempdir().unwrap();
    let doc = home.path().join("broken.json");
    std::fs::write(&doc, "this is not json").unwrap();

    phonectl(&home)
        .env("TEST_PHONE_PW", "pw")
        .args([
            "-a",
            "127.0.0.1:1",
            "--login",
            "admin",
            "--password-env",
            "TEST_PHONE_PW",
            "parameters",
            "upload",
        ])
        .arg(&doc)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("not a valid settings document"));
}

#[test]
fn completions_generate_a_script() {
    let home = tempfile::tempdir().unwrap();
    phonectl(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("phonectl"));
}

#[test]
fn config_path_prints_a_path() {
    let home = tempfile::tempdir().unwrap();
    phonectl(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(contains("config.toml"));
}

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("portcullis")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("signup"))
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("--backend"));
}

#[test]
fn test_login_help_shows_next() {
    cargo_bin_cmd!("portcullis")
        .args(["login", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--next"));
}

#[test]
fn test_unknown_backend_is_rejected() {
    cargo_bin_cmd!("portcullis")
        .args(["--backend", "ldap", "config", "path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown backend"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("portcullis")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_verify_on_memory_backend_points_to_signup_screen() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("portcullis")
        .env("PORTCULLIS_HOME", dir.path())
        .args(["verify", "some-token"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("signup screen"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verify_over_http_prints_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/verify/tok-123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "Your email has been verified"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        format!("[api]\nbase_url = \"{}/api\"\n", server.uri()),
    )
    .unwrap();

    cargo_bin_cmd!("portcullis")
        .env("PORTCULLIS_HOME", dir.path())
        .args(["--backend", "http", "verify", "tok-123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your email has been verified"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verify_over_http_rejection_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/verify/expired"))
        .respond_with(
            ResponseTemplate::new(410)
                .set_body_json(serde_json::json!({"message": "Token expired"})),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        format!("backend = \"http\"\n[api]\nbase_url = \"{}/api\"\n", server.uri()),
    )
    .unwrap();

    cargo_bin_cmd!("portcullis")
        .env("PORTCULLIS_HOME", dir.path())
        .args(["verify", "expired"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Token expired"));
}

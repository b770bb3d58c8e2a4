//! Integration tests for the status command and session confirmation.


use fixtures::{can_bind_localhost, google_user_json, password_user_json, session_path, sessctl, write_session};
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test: no stored session means an immediate "Not logged in.".
#[test]
fn test_status_without_session() {
    let temp = tempdir().unwrap();

    sessctl(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

/// Test: a confirmed session renders the profile card.
#[tokio::test(flavor = "multi_thread")]
async fn test_status_confirmed_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let temp = tempdir().unwrap();
    write_session(temp.path(), "tok-1", &password_user_json());
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/validate-token"))
        .and(body_json(json!({ "token": "tok-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": {
                    "id": "u-1",
                    "name": "Ada",
                    "email": "ada@example.com",
                    "has_password": true
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    sessctl(temp.path())
        .args(["--base-url", &server.uri(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Ada <ada@example.com>"))
        .stdout(predicate::str::contains("Password: set"))
        .stdout(predicate::str::contains("Google:   not connected"));

    assert!(
        session_path(temp.path()).exists(),
        "a confirmed session stays stored"
    );
}

/// Test: a server rejection logs the session out and clears storage.
#[tokio::test(flavor = "multi_thread")]
async fn test_status_rejected_session_logs_out() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let temp = tempdir().unwrap();
    write_session(temp.path(), "tok-stale", &password_user_json());
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/validate-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid or expired token"
        })))
        .mount(&server)
        .await;

    sessctl(temp.path())
        .args(["--base-url", &server.uri(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no longer valid"));

    assert!(
        !session_path(temp.path()).exists(),
        "a rejected session must be removed from storage"
    );
}

/// Test: an unreachable server demotes the session the same way.
#[test]
fn test_status_unreachable_server_logs_out() {
    let temp = tempdir().unwrap();
    write_session(temp.path(), "tok-1", &password_user_json());

    sessctl(temp.path())
        .args(["--base-url", "http://127.0.0.1:9", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no longer valid"));

    assert!(!session_path(temp.path()).exists());
}

/// Test: a Google-only account shows the set-password hint.
#[tokio::test(flavor = "multi_thread")]
async fn test_status_google_account_shows_set_password_hint() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let temp = tempdir().unwrap();
    write_session(temp.path(), "tok-2", &google_user_json());
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/validate-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": {
                    "id": "u-2",
                    "name": "Grace",
                    "email": "grace@example.com",
                    "has_password": false,
                    "uid": "ext-1"
                }
            }
        })))
        .mount(&server)
        .await;

    sessctl(temp.path())
        .args(["--base-url", &server.uri(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password: not set"))
        .stdout(predicate::str::contains("Google:   connected"))
        .stdout(predicate::str::contains("sessctl set-password"));
}

/// Test: a corrupt stored user record is discarded on restore.
#[test]
fn test_status_corrupt_stored_user() {
    let temp = tempdir().unwrap();
    write_session(temp.path(), "tok-1", "{not valid json");

    sessctl(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));

    assert!(
        !session_path(temp.path()).exists(),
        "a corrupt session must be cleared"
    );
}

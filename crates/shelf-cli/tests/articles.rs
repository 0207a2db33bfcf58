//! Search and saved-article commands against a mock backend.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Home directory with a stored session token.
fn logged_in_home() -> TempDir {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("session.json"),
        r#"{"access_token": "tok"}"#,
    )
    .unwrap();
    home
}

#[test]
fn test_protected_command_requires_login() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", home.path())
        .env("SHELF_BASE_URL", "http://127.0.0.1:9")
        .arg("saved")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[tokio::test]
async fn test_search_lists_results() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "big cats"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"title": "Lion", "url": "https://en.wikipedia.org/wiki/Lion", "summary": "A cat."},
            {"title": "Tiger", "url": "https://en.wikipedia.org/wiki/Tiger", "summary": "Stripes."}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", home.path())
        .env("SHELF_BASE_URL", server.uri())
        .args(["search", "big", "cats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lion"))
        .stdout(predicate::str::contains("Tiger"));
}

#[tokio::test]
async fn test_unauthorized_clears_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Could not validate credentials"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", home.path())
        .env("SHELF_BASE_URL", server.uri())
        .arg("saved")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session expired"));

    assert!(!home.path().join("session.json").exists());
}

#[tokio::test]
async fn test_saved_lists_large_ids_and_tags() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id": 123456789012345678901, "title": "Rust", "url": "https://en.wikipedia.org/wiki/Rust",
                "tags": [{"id": 1, "name": "lang"}, {"id": 2, "name": "systems"}]}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", home.path())
        .env("SHELF_BASE_URL", server.uri())
        .arg("saved")
        .assert()
        .success()
        .stdout(predicate::str::contains("123456789012345678901"))
        .stdout(predicate::str::contains("lang, systems"));
}

#[tokio::test]
async fn test_saved_empty_state() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", home.path())
        .env("SHELF_BASE_URL", server.uri())
        .arg("saved")
        .assert()
        .success()
        .stdout(predicate::str::contains("You haven't saved any articles yet."));
}

#[tokio::test]
async fn test_duplicate_save_reports_failure() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles/"))
        .and(body_json(serde_json::json!({
            "title": "Lion",
            "url": "https://en.wikipedia.org/wiki/Lion"
        })))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", home.path())
        .env("SHELF_BASE_URL", server.uri())
        .args([
            "save",
            "--title",
            "Lion",
            "--url",
            "https://en.wikipedia.org/wiki/Lion",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to save article. It might already be saved.",
        ));

    // A rejected save is not a session problem.
    assert!(home.path().join("session.json").exists());
}

#[tokio::test]
async fn test_set_tags_sends_parsed_list() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/articles/7/tags"))
        .and(body_json(serde_json::json!(["a", "b", "c"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7, "title": "T", "url": "u",
            "tags": [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}, {"id": 3, "name": "c"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", home.path())
        .env("SHELF_BASE_URL", server.uri())
        .args(["tags", "set", "7", "a, b ,,c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tags updated successfully!"))
        .stdout(predicate::str::contains("a, b, c"));
}

#[tokio::test]
async fn test_delete_with_confirmation() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 3, "title": "Lion", "url": "https://en.wikipedia.org/wiki/Lion", "tags": []}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/articles/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", home.path())
        .env("SHELF_BASE_URL", server.uri())
        .args(["delete", "3"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Are you sure you want to delete the article \"Lion\"?",
        ))
        .stdout(predicate::str::contains("Article deleted successfully!"));
}

#[tokio::test]
async fn test_delete_cancelled_makes_no_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = logged_in_home();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 3, "title": "Lion", "url": "u", "tags": []}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", home.path())
        .env("SHELF_BASE_URL", server.uri())
        .args(["delete", "3"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete cancelled."));
}

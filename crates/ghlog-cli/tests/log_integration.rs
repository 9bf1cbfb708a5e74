//! End-to-end tests running the `ghlog` binary against a mock GitHub API.

use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ghlog_binary() -> String {
    env!("CARGO_BIN_EXE_ghlog").to_string()
}

/// Runs ghlog isolated from the caller's config and tokens, in UTC.
fn run_ghlog(home: &TempDir, api_url: &str, args: &[&str]) -> Output {
    Command::new(ghlog_binary())
        .env_clear()
        .env("HOME", home.path())
        .env("TZ", "UTC")
        .env("GHLOG_API_URL", api_url)
        .args(args)
        .output()
        .expect("failed to run ghlog")
}

fn push(id: &str, actor: &str, created_at: &str, message: &str) -> Value {
    json!({
        "id": id,
        "type": "PushEvent",
        "created_at": created_at,
        "actor": {"login": actor},
        "repo": {"name": "acme/widgets"},
        "payload": {
            "ref": "refs/heads/main",
            "commits": [{"author": {"email": format!("{actor}@x.com")}, "message": message}]
        }
    })
}

async fn mount_identity(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "alice"})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/emails"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"email": "alice@x.com"}])),
        )
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, feed_path: &str, page: &str, events: Value) {
    Mock::given(method("GET"))
        .and(path(feed_path))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(events))
        .mount(server)
        .await;
}

#[test]
fn missing_token_exits_with_error() {
    let home = TempDir::new().unwrap();
    let output = run_ghlog(&home, "http://127.0.0.1:9", &["--date", "2024-05-01"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing GitHub token"), "stderr: {stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn prints_only_the_target_days_events() {
    let server = MockServer::start().await;
    mount_identity(&server).await;
    mount_page(
        &server,
        "/users/alice/events",
        "1",
        json!([
            push("3", "alice", "2024-05-01T14:00:00Z", "afternoon work"),
            push("2", "bob", "2024-05-01T09:00:00Z", "bob's morning"),
            push("1", "alice", "2024-04-30T23:00:00Z", "late night"),
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/events"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = run_ghlog(
        &home,
        &server.uri(),
        &["--token", "t0k3n", "--date", "2024-05-01"],
    );

    assert!(
        output.status.success(),
        "ghlog failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "2024-05-01 14:00:00+00:00 alice/Push\tacme/widgets:main - afternoon work\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_org_feed_does_not_stop_the_others() {
    let server = MockServer::start().await;
    mount_identity(&server).await;
    mount_page(
        &server,
        "/users/alice/events",
        "1",
        json!([
            push("5", "alice", "2024-05-01T15:00:00Z", "personal"),
            push("4", "alice", "2024-04-30T15:00:00Z", "old"),
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/events/orgs/broken"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Server Error"})),
        )
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/users/alice/events/orgs/acme",
        "1",
        json!([
            push("3", "alice", "2024-05-01T16:00:00Z", "org work"),
            push("2", "alice", "2024-04-30T16:00:00Z", "old"),
        ]),
    )
    .await;

    let home = TempDir::new().unwrap();
    let output = run_ghlog(
        &home,
        &server.uri(),
        &["-t", "t0k3n", "-d", "2024-05-01", "-o", "broken,acme"],
    );

    assert!(
        output.status.success(),
        "ghlog failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "2024-05-01 15:00:00+00:00 alice/Push\tacme/widgets:main - personal",
            "2024-05-01 16:00:00+00:00 alice/Push\tacme/widgets:main - org work",
        ]
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken"), "stderr: {stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn bad_token_aborts_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
        )
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = run_ghlog(&home, &server.uri(), &["-t", "expired", "-d", "2024-05-01"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to resolve GitHub identity"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("Bad credentials"), "stderr: {stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn event_filter_from_environment() {
    let server = MockServer::start().await;
    mount_identity(&server).await;
    mount_page(
        &server,
        "/users/alice/events",
        "1",
        json!([
            {
                "id": "9",
                "type": "PullRequestEvent",
                "created_at": "2024-05-01T18:00:00Z",
                "actor": {"login": "alice"},
                "repo": {"name": "acme/widgets"},
                "payload": {"action": "opened", "pull_request": {"title": "Add widgets"}}
            },
            push("8", "alice", "2024-05-01T17:00:00Z", "filtered out"),
            push("7", "alice", "2024-04-30T17:00:00Z", "old"),
        ]),
    )
    .await;

    let home = TempDir::new().unwrap();
    let output = Command::new(ghlog_binary())
        .env_clear()
        .env("HOME", home.path())
        .env("TZ", "UTC")
        .env("GHLOG_API_URL", server.uri())
        .env("GITHUB_TOKEN", "t0k3n")
        .env("GHLOG_EVENTS", "pullrequest")
        .args(["--date", "2024-05-01"])
        .output()
        .expect("failed to run ghlog");

    assert!(
        output.status.success(),
        "ghlog failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "2024-05-01 18:00:00+00:00 alice/PR\tacme/widgets - opened - Add widgets\n"
    );
}

#![allow(clippy::unwrap_used)]
// Integration tests for `IssuesClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use octoview_api::{Error, IssueState, IssuesClient, PageRequest, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, IssuesClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = IssuesClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

fn issue_body(number: u64, title: &str, state: &str) -> serde_json::Value {
    json!({
        "id": number * 100,
        "number": number,
        "title": title,
        "body": "details",
        "state": state,
        "created_at": "2024-06-15T10:30:00Z",
        "updated_at": "2024-06-16T08:00:00Z",
        "user": { "login": "ada", "avatar_url": "https://example.com/a.png" },
        "labels": [{ "name": "bug", "color": "d73a4a" }],
        "comments": 3,
        "html_url": format!("https://github.com/acme/widgets/issues/{number}")
    })
}

// ── Issue listing ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_issues_sends_pagination_and_media_type() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .and(query_param("state", "all"))
        .and(query_param("sort", "updated"))
        .and(query_param("direction", "desc"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            issue_body(42, "Widget crashes on resize", "open"),
            issue_body(41, "Docs typo", "closed"),
        ])))
        .mount(&server)
        .await;

    let repo = IssuesClient::parse_repository_url("https://github.com/acme/widgets").unwrap();
    let issues = client
        .get_repository_issues(
            &repo,
            PageRequest {
                page: 2,
                per_page: 10,
            },
        )
        .await
        .unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].number, 42);
    assert_eq!(issues[0].state, IssueState::Open);
    assert_eq!(issues[0].user.login, "ada");
    assert_eq!(issues[0].labels[0].name, "bug");
    assert_eq!(issues[0].comments, 3);
    assert_eq!(issues[1].state, IssueState::Closed);
}

#[tokio::test]
async fn test_missing_repository_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/ghost/issues"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })),
        )
        .mount(&server)
        .await;

    let repo = IssuesClient::parse_repository_url("https://github.com/acme/ghost").unwrap();
    let result = client.get_repository_issues(&repo, PageRequest::default()).await;

    match result {
        Err(e) => {
            assert!(e.is_not_found(), "expected not-found, got: {e:?}");
            assert_eq!(e.to_string(), "Not Found");
        }
        Ok(issues) => panic!("expected Http error, got: {issues:?}"),
    }
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let repo = IssuesClient::parse_repository_url("https://github.com/acme/widgets").unwrap();
    let result = client.get_repository_issues(&repo, PageRequest::default()).await;

    match result {
        Err(Error::Http { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Http error, got: {other:?}"),
    }
}

// ── Repository check ────────────────────────────────────────────────

#[tokio::test]
async fn test_check_repository_returns_metadata() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1296269,
            "full_name": "acme/widgets",
            "private": false,
            "description": "Widget factory",
            "open_issues_count": 12
        })))
        .mount(&server)
        .await;

    let repo = IssuesClient::parse_repository_url("https://github.com/acme/widgets").unwrap();
    let meta = client.check_repository(&repo).await.unwrap();

    assert_eq!(meta.full_name, "acme/widgets");
    assert!(!meta.private);
    assert_eq!(meta.open_issues_count, 12);
}

use mockito::{Matcher, Server};
use std::time::Duration;
use vitae_babel::fetch::{FetchError, FetchOptions, ResumeClient, DEFAULT_USER_AGENT};

fn client(server: &Server) -> ResumeClient {
    ResumeClient::new(FetchOptions {
        base_url: format!("{}/api/app/resumes", server.url()),
        ..FetchOptions::default()
    })
    .unwrap()
}

#[test]
fn test_fetch_returns_html_field() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/app/resumes/tok123")
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!({"html": "<h1>Jane</h1>", "id": 1}).to_string())
        .create();

    let html = client(&server).fetch_html("tok123").unwrap();
    mock.assert();
    assert_eq!(html, "<h1>Jane</h1>");
}

#[test]
fn test_custom_user_agent_is_sent() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/r/t")
        .match_header("user-agent", "vitae-test/1.0")
        .with_status(200)
        .with_body(serde_json::json!({"html": "<p>x</p>"}).to_string())
        .create();
    let client = ResumeClient::new(FetchOptions {
        base_url: format!("{}/r", server.url()),
        user_agent: "vitae-test/1.0".to_string(),
        ..FetchOptions::default()
    })
    .unwrap();

    client.fetch_html("t").unwrap();
    mock.assert();
}

#[test]
fn test_non_success_status() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/app/resumes/missing")
        .with_status(404)
        .with_body("{}")
        .create();

    let err = client(&server).fetch_html("missing").unwrap_err();
    mock.assert();
    assert!(matches!(err, FetchError::Status(404)));
    assert_eq!(err.to_string(), "server responded with status 404");
}

#[test]
fn test_missing_html_is_empty_content() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/app/resumes/t")
        .with_status(200)
        .with_body(r#"{"id": 3}"#)
        .create();

    let err = client(&server).fetch_html("t").unwrap_err();
    mock.assert();
    assert!(matches!(err, FetchError::EmptyContent));
}

#[test]
fn test_html_body_is_a_decode_error() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/app/resumes/t")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>sign in</html>")
        .create();

    let err = client(&server).fetch_html("t").unwrap_err();
    mock.assert();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[test]
fn test_invalid_token_never_hits_the_network() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create();

    let err = client(&server).fetch_html("a/b").unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl(_)));
    mock.assert();
}

#[test]
fn test_refused_connection_is_an_http_error() {
    let client = ResumeClient::new(FetchOptions {
        base_url: "http://127.0.0.1:1/r".to_string(),
        timeout: Duration::from_secs(2),
        ..FetchOptions::default()
    })
    .unwrap();

    let err = client.fetch_html("t").unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}

//! RedditSource against a local fake of the Reddit OAuth API

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use headline_core::Error;
use headline_source::{PostSource, RedditConfig, RedditSource};
use serde_json::{json, Value};
use std::collections::HashMap;

const BASIC_AUTH: &str = "Basic dGVzdC1pZDp0ZXN0LXNlY3JldA==";
const TOKEN: &str = "fake-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {}", TOKEN)[..])
}

async fn access_token(headers: HeaderMap, body: String) -> Response {
    let basic = headers.get("authorization").and_then(|v| v.to_str().ok());
    if basic != Some(BASIC_AUTH) || body != "grant_type=client_credentials" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized", "error": 401})))
            .into_response();
    }
    Json(json!({"access_token": TOKEN, "token_type": "bearer", "expires_in": 86400}))
        .into_response()
}

async fn about(Path(name): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match name.as_str() {
        "news" | "quiet" | "odd?name#1" => Json(json!({"kind": "t5", "data": {"display_name": name}})).into_response(),
        "private" => StatusCode::FORBIDDEN.into_response(),
        "search" => Json(json!({"kind": "Listing", "data": {"children": []}})).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found", "error": 404})))
            .into_response(),
    }
}

fn submission(title: &str, url: &str, created_utc: f64) -> Value {
    json!({"kind": "t3", "data": {
        "title": title,
        "url": url,
        "permalink": format!("/r/news/comments/{}/", title.len()),
        "created_utc": created_utc
    }})
}

async fn listing(
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if query.get("raw_json").map(String::as_str) != Some("1") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if name == "quiet" || name == "odd?name#1" {
        return Json(json!({"kind": "Listing", "data": {"after": null, "children": []}}))
            .into_response();
    }

    let page = match query.get("after").map(String::as_str) {
        None => json!({"kind": "Listing", "data": {
            "after": "t3_page2",
            "children": [
                submission("Great news!", "u1", 100.0),
                submission("Bad day", "u2", 200.0),
            ]
        }}),
        Some("t3_page2") => json!({"kind": "Listing", "data": {
            "after": null,
            "children": [
                submission("Same second A", "u3", 150.0),
                submission("Same second B", "", 150.0),
            ]
        }}),
        Some(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    Json(page).into_response()
}

async fn spawn_reddit() -> String {
    let app = Router::new()
        .route("/api/v1/access_token", post(access_token))
        .route("/r/:name/about", get(about))
        .route("/r/:name/new", get(listing));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(base: &str, secret: &str) -> RedditConfig {
    RedditConfig {
        client_id: "test-id".into(),
        client_secret: secret.into(),
        auth_url: base.to_string(),
        api_url: base.to_string(),
        page_size: 2,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_fetch_all_pages_newest_first() {
    let base = spawn_reddit().await;
    let source = RedditSource::new(config(&base, "test-secret")).unwrap();

    let posts = source.fetch("news").await.unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.text.as_str()).collect();

    assert_eq!(
        titles,
        vec!["Bad day", "Same second A", "Same second B", "Great news!"]
    );
    assert_eq!(posts[0].link, "u2");
    assert_eq!(posts[3].link, "u1");
    assert_eq!(posts[0].created_at.timestamp(), 200);
    assert_eq!(
        posts[2].link,
        format!("https://www.reddit.com/r/news/comments/{}/", "Same second B".len())
    );
}

#[tokio::test]
async fn test_prefixed_channel_name() {
    let base = spawn_reddit().await;
    let source = RedditSource::new(config(&base, "test-secret")).unwrap();

    assert_eq!(source.fetch("r/news").await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_empty_channel() {
    let base = spawn_reddit().await;
    let source = RedditSource::new(config(&base, "test-secret")).unwrap();

    assert!(source.fetch("quiet").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_channel() {
    let base = spawn_reddit().await;
    let source = RedditSource::new(config(&base, "test-secret")).unwrap();

    let err = source.fetch("doesnotexist").await.unwrap_err();
    assert!(matches!(err, Error::ChannelNotFound(ref name) if name == "doesnotexist"));

    let err = source.fetch("search").await.unwrap_err();
    assert!(matches!(err, Error::ChannelNotFound(_)));

    let err = source.fetch("/r/").await.unwrap_err();
    assert!(matches!(err, Error::ChannelNotFound(ref name) if name == "/r/"));
}

#[tokio::test]
async fn test_reserved_characters_stay_in_channel_name() {
    let base = spawn_reddit().await;
    let source = RedditSource::new(config(&base, "test-secret")).unwrap();

    assert!(source.fetch("odd?name#1").await.unwrap().is_empty());

    let err = source.fetch("news?after=x").await.unwrap_err();
    assert!(matches!(err, Error::ChannelNotFound(ref name) if name == "news?after=x"));
}

#[tokio::test]
async fn test_private_channel() {
    let base = spawn_reddit().await;
    let source = RedditSource::new(config(&base, "test-secret")).unwrap();

    let err = source.fetch("private").await.unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable(_)));
}

#[tokio::test]
async fn test_rejected_credentials() {
    let base = spawn_reddit().await;
    let source = RedditSource::new(config(&base, "wrong-secret")).unwrap();

    let err = source.fetch("news").await.unwrap_err();
    match err {
        Error::SourceUnavailable(msg) => assert!(msg.contains("credentials rejected"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_forum() {
    let source = RedditSource::new(config("http://127.0.0.1:1", "test-secret")).unwrap();

    let err = source.fetch("news").await.unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable(_)));
}

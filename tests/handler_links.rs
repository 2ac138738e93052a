mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use shortlink::api::dto::link::LinkResponse;
use shortlink::domain::repositories::LinkStore;
use shortlink::utils::code_generator::is_valid_code;

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_link_generates_code() {
    let (server, store) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com/a" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let link = response.json::<LinkResponse>();
    assert_eq!(link.code.len(), 6);
    assert!(is_valid_code(&link.code));
    assert_eq!(link.url, "https://example.com/a");
    assert_eq!(link.clicks, 0);
    assert!(link.last_clicked.is_none());

    assert!(store.lookup(&link.code).await.unwrap().is_some());
}

#[tokio::test]
async fn test_same_url_twice_gets_distinct_codes() {
    let (server, store) = common::create_test_server();

    let first = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json::<LinkResponse>();
    let second = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json::<LinkResponse>();

    assert_ne!(first.code, second.code);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_create_link_with_custom_code() {
    let (server, _store) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com/promo", "code": "promo24" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<LinkResponse>().code, "promo24");
}

#[tokio::test]
async fn test_create_link_custom_code_conflict() {
    let (server, store) = common::create_test_server();
    common::seed_link(&store, "taken1", "https://example.com/original");

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com/other", "code": "taken1" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "code_conflict");
    assert_eq!(json["error"]["details"]["code"], "taken1");

    let stored = store.lookup("taken1").await.unwrap().unwrap();
    assert_eq!(stored.url, "https://example.com/original");
}

#[tokio::test]
async fn test_create_link_rejects_non_http_url() {
    let (server, store) = common::create_test_server();

    for url in ["ftp://example.com/file", "javascript:alert(1)", "not a url", ""] {
        let response = server.post("/api/links").json(&json!({ "url": url })).await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url", "{url:?}");
    }

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_link_rejects_bad_code() {
    let (server, store) = common::create_test_server();

    for code in ["ab", "has space", "abc-123", "waytoolong", "health"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": "https://example.com/", "code": code }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"]["code"],
            "invalid_code_format",
            "{code:?}"
        );
    }

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_link_missing_url_is_bad_request() {
    let (server, _store) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "code": "abc123" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
}

// ─── GET ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_link_does_not_count_click() {
    let (server, store) = common::create_test_server();
    common::seed_link(&store, "abc123", "https://example.com/a");

    let response = server.get("/api/links/abc123").await;

    response.assert_status_ok();
    let link = response.json::<LinkResponse>();
    assert_eq!(link.url, "https://example.com/a");
    assert_eq!(link.clicks, 0);
    assert!(link.last_clicked.is_none());

    assert_eq!(store.lookup("abc123").await.unwrap().unwrap().clicks, 0);
}

#[tokio::test]
async fn test_get_link_not_found() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/api/links/nothere").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_get_link_malformed_code_is_not_found() {
    let (server, _store) = common::create_test_server();

    server.get("/api/links/ab").await.assert_status_not_found();
    server.get("/api/links/abc-123").await.assert_status_not_found();
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_links_newest_first() {
    let (server, store) = common::create_test_server();
    let now = Utc::now();
    common::seed_link_at(&store, "oldest1", "https://example.com/1", now - Duration::hours(2));
    common::seed_link_at(&store, "middle1", "https://example.com/2", now - Duration::hours(1));
    common::seed_link_at(&store, "newest1", "https://example.com/3", now);

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    let codes: Vec<String> = response
        .json::<Vec<LinkResponse>>()
        .into_iter()
        .map(|link| link.code)
        .collect();
    assert_eq!(codes, ["newest1", "middle1", "oldest1"]);
}

#[tokio::test]
async fn test_list_links_paginates() {
    let (server, store) = common::create_test_server();
    let now = Utc::now();
    for i in 0..5 {
        common::seed_link_at(
            &store,
            &format!("code{i:02}"),
            "https://example.com/",
            now - Duration::minutes(i),
        );
    }

    let page = server
        .get("/api/links")
        .add_query_param("page", 2)
        .add_query_param("page_size", 2)
        .await
        .json::<Vec<LinkResponse>>();

    let codes: Vec<&str> = page.iter().map(|link| link.code.as_str()).collect();
    assert_eq!(codes, ["code02", "code03"]);
}

#[tokio::test]
async fn test_list_links_bad_pagination_uses_defaults() {
    let (server, store) = common::create_test_server();
    let now = Utc::now();
    for i in 0..30 {
        common::seed_link_at(
            &store,
            &format!("page{i:02}"),
            "https://example.com/",
            now - Duration::minutes(i),
        );
    }

    let response = server.get("/api/links").add_query_param("page", -1).await;

    response.assert_status_ok();
    let links = response.json::<Vec<LinkResponse>>();
    assert_eq!(links.len(), 25);
    assert_eq!(links[0].code, "page00");

    let response = server
        .get("/api/links")
        .add_query_param("page", 2)
        .add_query_param("page_size", "abc")
        .await;

    response.assert_status_ok();
    let links = response.json::<Vec<LinkResponse>>();
    assert_eq!(links.len(), 5);
    assert_eq!(links[0].code, "page25");
}

#[tokio::test]
async fn test_list_links_empty() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    assert!(response.json::<Vec<LinkResponse>>().is_empty());
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_link_success() {
    let (server, store) = common::create_test_server();
    common::seed_link(&store, "del001", "https://example.com/");

    let response = server.delete("/api/links/del001").await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(store.lookup("del001").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_link_twice() {
    let (server, store) = common::create_test_server();
    common::seed_link(&store, "del002", "https://example.com/");

    server
        .delete("/api/links/del002")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete("/api/links/del002")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_link_not_found() {
    let (server, _store) = common::create_test_server();

    server
        .delete("/api/links/nonexistent")
        .await
        .assert_status_not_found();
}

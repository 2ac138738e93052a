mod common;

#[tokio::test]
async fn test_index_page_served() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("<title>shortlink</title>"));
}

#[tokio::test]
async fn test_static_assets_served() {
    let (server, _store) = common::create_test_server();

    server.get("/static/app.js").await.assert_status_ok();
    server.get("/static/style.css").await.assert_status_ok();
}

#[tokio::test]
async fn test_missing_static_asset() {
    let (server, _store) = common::create_test_server();

    server.get("/static/missing.js").await.assert_status_not_found();
}

#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, Utc};
use shortlink::application::services::AllocationPolicy;
use shortlink::domain::entities::Link;
use shortlink::domain::repositories::LinkStore;
use shortlink::infrastructure::persistence::MemoryLinkStore;
use shortlink::routes::router;
use shortlink::state::AppState;
use std::sync::Arc;

pub fn create_test_state() -> (AppState, Arc<MemoryLinkStore>) {
    let store = Arc::new(MemoryLinkStore::new());
    let state = AppState::new(
        store.clone() as Arc<dyn LinkStore>,
        AllocationPolicy::default(),
    );

    (state, store)
}

/// Full application router over a fresh in-memory store.
pub fn create_test_server() -> (TestServer, Arc<MemoryLinkStore>) {
    let (state, store) = create_test_state();
    let server = TestServer::new(router(state, "static")).unwrap();

    (server, store)
}

pub fn seed_link(store: &MemoryLinkStore, code: &str, url: &str) {
    store.seed(Link::new(code, url, Utc::now()));
}

pub fn seed_link_at(store: &MemoryLinkStore, code: &str, url: &str, created_at: DateTime<Utc>) {
    store.seed(Link::new(code, url, created_at));
}

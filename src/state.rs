//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AllocationPolicy, CodeAllocator, LinkService, Resolver};
use crate::domain::repositories::LinkStore;

/// Services built around one shared store handle.
///
/// Cloning is cheap; every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<CodeAllocator<dyn LinkStore>>,
    pub resolver: Arc<Resolver<dyn LinkStore>>,
    pub link_service: Arc<LinkService<dyn LinkStore>>,
}

impl AppState {
    pub fn new(store: Arc<dyn LinkStore>, policy: AllocationPolicy) -> Self {
        Self {
            allocator: Arc::new(CodeAllocator::new(store.clone(), policy)),
            resolver: Arc::new(Resolver::new(store.clone())),
            link_service: Arc::new(LinkService::new(store)),
        }
    }
}

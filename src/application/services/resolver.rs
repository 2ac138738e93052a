//! Code resolution with exactly-once click counting.

use std::sync::Arc;

use tracing::debug;

use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;

/// Resolves codes to destination URLs, counting each resolution.
///
/// The read, the increment and the timestamp update happen in one store call
/// ([`LinkStore::resolve_and_increment`]), which the store serializes per
/// code. The resolver itself holds no in-process state.
pub struct Resolver<S: LinkStore + ?Sized> {
    store: Arc<S>,
}

impl<S: LinkStore + ?Sized> Resolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the URL to redirect to and records the click.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - code is absent, deleted, or malformed.
    ///   Malformed codes are rejected without a store access.
    /// - [`AppError::StoreFailure`] - the unit of work was rolled back
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            debug!(code, "Rejected malformed code");
            return Err(AppError::NotFound);
        }

        match self.store.resolve_and_increment(code).await? {
            Some(url) => {
                debug!(code, "Resolved");
                Ok(url)
            }
            None => Err(AppError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkStore;

    #[tokio::test]
    async fn test_resolve_returns_url() {
        let mut store = MockLinkStore::new();
        store
            .expect_resolve_and_increment()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(Some("https://example.com/".to_string())));

        let resolver = Resolver::new(Arc::new(store));

        assert_eq!(
            resolver.resolve("abc123").await.unwrap(),
            "https://example.com/"
        );
    }

    #[tokio::test]
    async fn test_resolve_absent_is_not_found() {
        let mut store = MockLinkStore::new();
        store
            .expect_resolve_and_increment()
            .times(1)
            .returning(|_| Ok(None));

        let resolver = Resolver::new(Arc::new(store));

        assert!(matches!(
            resolver.resolve("abc123").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_malformed_code_skips_store() {
        let mut store = MockLinkStore::new();
        store.expect_resolve_and_increment().times(0);
        store.expect_lookup().times(0);

        let resolver = Resolver::new(Arc::new(store));

        for code in ["ab", "has space", "abc-123", "waytoolong", ""] {
            assert!(
                matches!(resolver.resolve(code).await, Err(AppError::NotFound)),
                "{code:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let mut store = MockLinkStore::new();
        store
            .expect_resolve_and_increment()
            .returning(|_| Err(AppError::StoreFailure(sqlx::Error::PoolTimedOut)));

        let resolver = Resolver::new(Arc::new(store));

        assert!(matches!(
            resolver.resolve("abc123").await,
            Err(AppError::StoreFailure(_))
        ));
    }
}

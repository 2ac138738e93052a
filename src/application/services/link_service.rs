//! Link retrieval, listing and deletion.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;

/// Read and delete operations on stored links.
///
/// Malformed codes are reported as [`AppError::NotFound`] without a store
/// access, the same as absent ones.
pub struct LinkService<S: LinkStore + ?Sized> {
    store: Arc<S>,
}

impl<S: LinkStore + ?Sized> LinkService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Retrieves a link without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::StoreFailure`] on database errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::NotFound);
        }

        self.store.lookup(code).await?.ok_or(AppError::NotFound)
    }

    /// Lists links newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreFailure`] on database errors.
    pub async fn list_links(&self, offset: i64, limit: i64) -> Result<Vec<Link>, AppError> {
        self.store.list(limit, offset).await
    }

    /// Deletes a link. Subsequent resolutions report not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::StoreFailure`] on database errors.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !is_valid_code(code) {
            return Err(AppError::NotFound);
        }

        if self.store.delete(code).await? {
            info!(code, "Deleted link");
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    /// Returns `true` if the store is reachable.
    pub async fn store_available(&self) -> bool {
        self.store.ping().await
    }
}

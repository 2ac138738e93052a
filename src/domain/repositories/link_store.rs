//! Storage contract for short links.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Result of a conditional insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The code was free and the link is now stored.
    Inserted(Link),
    /// A link with this code already exists; nothing was written.
    Conflict,
}

/// Persistent table of links keyed by code.
///
/// The store is the only shared mutable resource in the service. All
/// coordination between concurrent requests, and between service instances,
/// is delegated to it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - in-process, for tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Point lookup by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreFailure`] on database errors.
    async fn lookup(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Inserts a new link unless the code is already taken.
    ///
    /// The check and the write are a single atomic step: a uniqueness
    /// violation is reported as [`InsertOutcome::Conflict`], never as an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreFailure`] on database errors.
    async fn insert_if_absent(&self, code: &str, url: &str) -> Result<InsertOutcome, AppError>;

    /// Reads the URL for `code`, increments `clicks` and stamps `last_clicked`
    /// as one unit of work.
    ///
    /// Concurrent calls for the same code are serialized, and a call racing a
    /// [`delete`](LinkStore::delete) either completes fully before it or
    /// observes the row as absent.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` - the URL read under the lock; the increment is committed
    /// - `Ok(None)` - no such code; nothing was written
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreFailure`] after rolling back any partial work.
    async fn resolve_and_increment(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Removes a link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreFailure`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Lists links ordered by `created_at` descending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreFailure`] on database errors.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError>;

    /// Returns `true` if the backing store is reachable.
    async fn ping(&self) -> bool;
}

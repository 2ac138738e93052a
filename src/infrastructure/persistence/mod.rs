//! [`LinkStore`](crate::domain::repositories::LinkStore) implementations.
//!
//! Queries are runtime-checked (`sqlx::query` / `query_as`), so the crate builds
//! without a live database.
//!
//! # Stores
//!
//! - [`PgLinkStore`] - PostgreSQL, used by the server and the admin CLI
//! - [`MemoryLinkStore`] - in-process test support for the handler and
//!   concurrency suites; the server never constructs it

pub mod memory_link_store;
pub mod pg_link_store;

pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;

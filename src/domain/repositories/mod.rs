//! Storage contract for the domain layer.
//!
//! [`LinkStore`] abstracts the persistent table of links. Implementations live
//! in `crate::infrastructure::persistence`; a `mockall` mock is generated for
//! unit tests.
//!
//! # Testing
//!
//! See `tests/repository_link.rs` for the PostgreSQL contract tests and
//! `tests/concurrency.rs` for the atomicity properties.

pub mod link_store;

pub use link_store::{InsertOutcome, LinkStore};

#[cfg(test)]
pub use link_store::MockLinkStore;

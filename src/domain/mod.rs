//! Domain layer containing business entities and the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - The [`repositories::LinkStore`] contract implemented by
//!   the infrastructure layer
//!
//! The domain layer has no dependencies on the HTTP layer. Allocation and
//! resolution logic live in [`crate::application::services`] and delegate all
//! coordination to the store.

pub mod entities;
pub mod repositories;

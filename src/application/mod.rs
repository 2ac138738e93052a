//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkStore`] contract
//! and provide the operations used by HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::code_allocator::CodeAllocator`] - Collision-free code allocation
//! - [`services::resolver::Resolver`] - Resolution with click counting
//! - [`services::link_service::LinkService`] - Retrieval, listing and deletion

pub mod services;

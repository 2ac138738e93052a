//! Core domain entities.
//!
//! - [`Link`] - A stored short code with its destination and usage counters

pub mod link;

pub use link::Link;

//! Helper functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and format rules
//! - [`url_validator`] - Destination URL validation
//! - [`db_error`] - PostgreSQL error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;

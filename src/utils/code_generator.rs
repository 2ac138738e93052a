//! Short code generation and format rules.
//!
//! Codes are 6-8 ASCII alphanumeric characters (`^[A-Za-z0-9]{6,8}$`).
//! Generated codes draw uniformly from the 62-character alphabet using the
//! thread-local CSPRNG.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;

/// Shortest accepted code.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest accepted code.
pub const MAX_CODE_LENGTH: usize = 8;

/// Wire format of a short code.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("code pattern is valid"));

/// Codes that collide with top-level routes and can never be stored.
pub const RESERVED_CODES: &[&str] = &["health", "static"];

/// Generates a random alphanumeric code of exactly `length` characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns `true` if `code` matches the wire format.
///
/// Reserved codes match the format; use [`is_reserved`] to exclude them.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Returns `true` if `code` is taken by a system route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// Validates a caller-supplied code.
///
/// # Errors
///
/// Returns [`AppError::InvalidCodeFormat`] if the code does not match the wire
/// format or is reserved.
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code(code) {
        return Err(AppError::invalid_code(format!(
            "code must be {MIN_CODE_LENGTH}-{MAX_CODE_LENGTH} alphanumeric characters"
        )));
    }

    if is_reserved(code) {
        return Err(AppError::invalid_code(format!("'{code}' is reserved")));
    }

    Ok(())
}

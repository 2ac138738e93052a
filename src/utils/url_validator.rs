//! Destination URL validation.
//!
//! Only absolute `http`/`https` URLs with a host are accepted. The stored form
//! is the serialization produced by the [`url`] crate, which is pure ASCII and
//! therefore always usable as a `Location` header value.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a destination URL and returns its canonical serialization.
///
/// # Canonical form
///
/// - Scheme and host are lowercased
/// - Default ports (80 for HTTP, 443 for HTTPS) are dropped
/// - An empty path becomes `/`
/// - Non-ASCII hosts are punycode-encoded, other non-ASCII characters are
///   percent-encoded
///
/// Query strings and fragments are preserved.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for relative or malformed URLs,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes such as
/// `javascript:` or `ftp:`, and [`UrlValidationError::MissingHost`] when no host
/// is present.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     validate_url("HTTPS://Example.COM:443/a").unwrap(),
///     "https://example.com/a"
/// );
/// assert!(validate_url("ftp://example.com/file").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let url =
        Url::parse(input.trim()).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    Ok(url.into())
}

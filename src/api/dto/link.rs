//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
///
/// Shape checks only; the allocator applies the full URL and code rules.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL (absolute, HTTP or HTTPS).
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional caller-chosen code. Never auto-escalated on conflict.
    #[validate(length(min = 6, max = 8, message = "Code must be 6-8 characters"))]
    pub code: Option<String>,
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub code: String,
    pub url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            url: link.url,
            clicks: link.clicks,
            last_clicked: link.last_clicked,
            created_at: link.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_code() {
        let req: CreateLinkRequest =
            serde_json::from_str(r#"{"url": "https://example.com/a"}"#).unwrap();

        assert!(req.code.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_request_code_length_checked() {
        let req: CreateLinkRequest =
            serde_json::from_str(r#"{"url": "https://example.com/a", "code": "ab"}"#).unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("code"));
    }

    #[test]
    fn test_request_empty_url_rejected() {
        let req: CreateLinkRequest = serde_json::from_str(r#"{"url": ""}"#).unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
    }

    #[test]
    fn test_response_serializes_null_last_clicked() {
        let link = Link::new("abc123", "https://example.com/", Utc::now());
        let json = serde_json::to_value(LinkResponse::from(link)).unwrap();

        assert_eq!(json["code"], "abc123");
        assert_eq!(json["clicks"], 0);
        assert!(json["last_clicked"].is_null());
    }
}

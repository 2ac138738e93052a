//! Link entity representing a short code mapping.

use chrono::{DateTime, Utc};

/// A stored short link with usage metadata.
///
/// `code`, `url` and `created_at` never change after insertion. `clicks` and
/// `last_clicked` are only advanced by a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a freshly inserted link: zero clicks, never resolved.
    pub fn new(code: impl Into<String>, url: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
            clicks: 0,
            last_clicked: None,
            created_at,
        }
    }

    /// Applies one resolution at `now`.
    ///
    /// `last_clicked` never moves backwards, even if `now` is earlier than the
    /// previous stamp.
    pub fn record_click(&mut self, now: DateTime<Utc>) {
        self.clicks += 1;
        self.last_clicked = Some(match self.last_clicked {
            Some(previous) if previous > now => previous,
            _ => now,
        });
    }
}

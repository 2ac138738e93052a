//! In-process link store for tests.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::Link;
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::AppError;

/// In-memory store with the same atomicity contract as [`super::PgLinkStore`].
///
/// Each code lives in one `DashMap` shard. Insert-if-absent goes through the
/// entry API and resolution mutates the entry under its exclusive guard, so
/// both are atomic per code. No guard is held across an `.await`.
///
/// Used by handler and concurrency tests; not selectable as a production
/// backend.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    links: DashMap<String, Link>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `link` as-is, replacing any existing row with the same code.
    ///
    /// Lets tests pre-populate codes, counters and creation times.
    pub fn seed(&self, link: Link) {
        self.links.insert(link.code.clone(), link);
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn lookup(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn insert_if_absent(&self, code: &str, url: &str) -> Result<InsertOutcome, AppError> {
        match self.links.entry(code.to_owned()) {
            Entry::Occupied(_) => Ok(InsertOutcome::Conflict),
            Entry::Vacant(slot) => {
                let link = Link::new(code, url, Utc::now());
                slot.insert(link.clone());
                Ok(InsertOutcome::Inserted(link))
            }
        }
    }

    async fn resolve_and_increment(&self, code: &str) -> Result<Option<String>, AppError> {
        let Some(mut entry) = self.links.get_mut(code) else {
            return Ok(None);
        };

        entry.record_click(Utc::now());
        Ok(Some(entry.url.clone()))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });

        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);

        Ok(links.into_iter().skip(offset).take(limit).collect())
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let store = MemoryLinkStore::new();

        let outcome = store
            .insert_if_absent("abc123", "https://example.com/")
            .await
            .unwrap();
        assert!(matches!(outcome, InsertOutcome::Inserted(_)));

        let link = store.lookup("abc123").await.unwrap().unwrap();
        assert_eq!(link.url, "https://example.com/");
        assert_eq!(link.clicks, 0);
        assert!(link.last_clicked.is_none());
    }

    #[tokio::test]
    async fn test_insert_conflict_leaves_original() {
        let store = MemoryLinkStore::new();

        store
            .insert_if_absent("abc123", "https://example.com/")
            .await
            .unwrap();
        let outcome = store
            .insert_if_absent("abc123", "https://other.com/")
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::Conflict);
        let link = store.lookup("abc123").await.unwrap().unwrap();
        assert_eq!(link.url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_resolve_increments() {
        let store = MemoryLinkStore::new();
        store
            .insert_if_absent("abc123", "https://example.com/")
            .await
            .unwrap();

        let url = store.resolve_and_increment("abc123").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com/"));

        store.resolve_and_increment("abc123").await.unwrap();

        let link = store.lookup("abc123").await.unwrap().unwrap();
        assert_eq!(link.clicks, 2);
        assert!(link.last_clicked.is_some());
    }

    #[tokio::test]
    async fn test_resolve_missing() {
        let store = MemoryLinkStore::new();
        assert!(store.resolve_and_increment("nope12").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryLinkStore::new();
        store
            .insert_if_absent("abc123", "https://example.com/")
            .await
            .unwrap();

        assert!(store.delete("abc123").await.unwrap());
        assert!(!store.delete("abc123").await.unwrap());
        assert!(store.lookup("abc123").await.unwrap().is_none());
        assert!(store.resolve_and_increment("abc123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_pagination() {
        let store = MemoryLinkStore::new();
        let now = Utc::now();

        for (i, code) in ["first1", "second", "third3"].iter().enumerate() {
            store.seed(Link::new(
                *code,
                "https://example.com/",
                now + Duration::seconds(i as i64),
            ));
        }

        let all = store.list(10, 0).await.unwrap();
        let codes: Vec<&str> = all.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["third3", "second", "first1"]);

        let page = store.list(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].code, "second");

        assert!(store.list(10, 5).await.unwrap().is_empty());
    }
}

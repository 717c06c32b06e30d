use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use unlink_core::error::StorageError;
use unlink_core::record::{Shortcut, ShortcutRecord, Visit};
use unlink_core::repository::{ReadRepository, Repository, Result};

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap's sharded locks make every check-and-act below a single
/// atomic step for a given shortcut: `entry` pins the shard for
/// insert-if-absent, `get_mut` pins it for the conditional field update
/// and the visit append, and `remove_if` pins it for the owner-gated
/// delete. No operation decomposes into a separate read and write.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    storage: DashMap<String, ShortcutRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, shortcut: &Shortcut) -> Result<Option<ShortcutRecord>> {
        Ok(self
            .storage
            .get(shortcut.as_str())
            .map(|entry| entry.clone()))
    }

    async fn exists(&self, shortcut: &Shortcut) -> Result<bool> {
        Ok(self.storage.contains_key(shortcut.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, record: ShortcutRecord) -> Result<()> {
        match self.storage.entry(record.shortcut.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(record.shortcut.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn update_target(
        &self,
        shortcut: &Shortcut,
        owner: &str,
        target_url: &str,
    ) -> Result<bool> {
        let Some(mut entry) = self.storage.get_mut(shortcut.as_str()) else {
            return Ok(false);
        };

        if entry.owner != owner {
            return Ok(false);
        }

        entry.target_url = target_url.to_owned();
        Ok(true)
    }

    async fn delete(&self, shortcut: &Shortcut, owner: &str) -> Result<bool> {
        Ok(self
            .storage
            .remove_if(shortcut.as_str(), |_, record| record.owner == owner)
            .is_some())
    }

    async fn push_visit(&self, shortcut: &Shortcut, visit: Visit) -> Result<bool> {
        let Some(mut entry) = self.storage.get_mut(shortcut.as_str()) else {
            return Ok(false);
        };

        entry.visitors.push(visit);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use std::net::IpAddr;

    fn shortcut(s: &str) -> Shortcut {
        Shortcut::new_unchecked(s)
    }

    fn record(s: &str, url: &str, owner: &str) -> ShortcutRecord {
        ShortcutRecord::new(shortcut(s), url, owner)
    }

    fn visit(ip: &str) -> Visit {
        Visit::now(ip.parse::<IpAddr>().unwrap())
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();

        repo.insert(record("abc", "http://example.com", "alice"))
            .await
            .unwrap();

        let got = repo.get(&shortcut("abc")).await.unwrap().unwrap();
        assert_eq!(got.target_url, "http://example.com");
        assert_eq!(got.owner, "alice");
        assert!(got.visitors.is_empty());
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let got = repo.get(&shortcut("nope")).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn insert_conflict_keeps_incumbent() {
        let repo = InMemoryRepository::new();

        repo.insert(record("abc", "http://first.example", "alice"))
            .await
            .unwrap();

        let err = repo
            .insert(record("abc", "http://second.example", "bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        let got = repo.get(&shortcut("abc")).await.unwrap().unwrap();
        assert_eq!(got.target_url, "http://first.example");
        assert_eq!(got.owner, "alice");
    }

    #[tokio::test]
    async fn update_target_with_matching_owner() {
        let repo = InMemoryRepository::new();

        repo.insert(record("abc", "http://old.example", "alice"))
            .await
            .unwrap();

        assert!(repo
            .update_target(&shortcut("abc"), "alice", "http://new.example")
            .await
            .unwrap());

        let got = repo.get(&shortcut("abc")).await.unwrap().unwrap();
        assert_eq!(got.target_url, "http://new.example");
        assert_eq!(got.owner, "alice");
    }

    #[tokio::test]
    async fn update_target_with_wrong_owner_is_a_no_op() {
        let repo = InMemoryRepository::new();

        repo.insert(record("abc", "http://old.example", "alice"))
            .await
            .unwrap();

        assert!(!repo
            .update_target(&shortcut("abc"), "bob", "http://new.example")
            .await
            .unwrap());

        let got = repo.get(&shortcut("abc")).await.unwrap().unwrap();
        assert_eq!(got.target_url, "http://old.example");
    }

    #[tokio::test]
    async fn update_target_missing_record() {
        let repo = InMemoryRepository::new();

        assert!(!repo
            .update_target(&shortcut("nope"), "alice", "http://new.example")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn update_preserves_visit_log() {
        let repo = InMemoryRepository::new();

        repo.insert(record("abc", "http://old.example", "alice"))
            .await
            .unwrap();
        repo.push_visit(&shortcut("abc"), visit("1.2.3.4"))
            .await
            .unwrap();

        repo.update_target(&shortcut("abc"), "alice", "http://new.example")
            .await
            .unwrap();

        let got = repo.get(&shortcut("abc")).await.unwrap().unwrap();
        assert_eq!(got.visitors.len(), 1);
        assert_eq!(got.visitors[0].ip, "1.2.3.4".parse::<IpAddr>().unwrap());
    }

    #[tokio::test]
    async fn delete_with_matching_owner() {
        let repo = InMemoryRepository::new();

        repo.insert(record("abc", "http://example.com", "alice"))
            .await
            .unwrap();

        assert!(repo.delete(&shortcut("abc"), "alice").await.unwrap());
        assert!(!repo.exists(&shortcut("abc")).await.unwrap());
    }

    #[tokio::test]
    async fn delete_with_wrong_owner_keeps_record() {
        let repo = InMemoryRepository::new();

        repo.insert(record("abc", "http://example.com", "alice"))
            .await
            .unwrap();

        assert!(!repo.delete(&shortcut("abc"), "bob").await.unwrap());
        assert!(repo.exists(&shortcut("abc")).await.unwrap());
    }

    #[tokio::test]
    async fn delete_nonexistent() {
        let repo = InMemoryRepository::new();

        assert!(!repo.delete(&shortcut("nope"), "alice").await.unwrap());
    }

    #[tokio::test]
    async fn push_visit_preserves_order() {
        let repo = InMemoryRepository::new();

        repo.insert(record("abc", "http://example.com", "alice"))
            .await
            .unwrap();

        assert!(repo
            .push_visit(&shortcut("abc"), visit("1.2.3.4"))
            .await
            .unwrap());
        assert!(repo
            .push_visit(&shortcut("abc"), visit("5.6.7.8"))
            .await
            .unwrap());

        let got = repo.get(&shortcut("abc")).await.unwrap().unwrap();
        assert_eq!(got.visitors.len(), 2);
        assert_eq!(got.visitors[0].ip, "1.2.3.4".parse::<IpAddr>().unwrap());
        assert_eq!(got.visitors[1].ip, "5.6.7.8".parse::<IpAddr>().unwrap());
        assert!(got.visitors[0].at <= got.visitors[1].at);
    }

    #[tokio::test]
    async fn push_visit_missing_record_creates_nothing() {
        let repo = InMemoryRepository::new();

        assert!(!repo
            .push_visit(&shortcut("nope"), visit("1.2.3.4"))
            .await
            .unwrap());
        assert!(!repo.exists(&shortcut("nope")).await.unwrap());
    }

    #[tokio::test]
    async fn exists_checks() {
        let repo = InMemoryRepository::new();

        assert!(!repo.exists(&shortcut("abc")).await.unwrap());

        repo.insert(record("abc", "http://example.com", "alice"))
            .await
            .unwrap();

        assert!(repo.exists(&shortcut("abc")).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_inserts_have_a_single_winner() {
        use std::sync::Arc;

        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(record(
                    "contested",
                    &format!("http://example{}.com", i),
                    &format!("owner-{}", i),
                ))
                .await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);

        // The surviving record is exactly one caller's, never a merge.
        let got = repo.get(&shortcut("contested")).await.unwrap().unwrap();
        let owner_index: u64 = got.owner.strip_prefix("owner-").unwrap().parse().unwrap();
        assert_eq!(got.target_url, format!("http://example{}.com", owner_index));
    }

    #[tokio::test]
    async fn concurrent_visits_are_all_recorded() {
        use std::sync::Arc;

        let repo = Arc::new(InMemoryRepository::new());
        repo.insert(record("abc", "http://example.com", "alice"))
            .await
            .unwrap();

        let mut handles = vec![];
        for i in 0..50u8 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.push_visit(&shortcut("abc"), visit(&format!("10.0.0.{}", i)))
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap());
        }

        let got = repo.get(&shortcut("abc")).await.unwrap().unwrap();
        assert_eq!(got.visitors.len(), 50);
        for pair in got.visitors.windows(2) {
            assert!(pair[0].at <= pair[1].at);
        }
    }

    #[tokio::test]
    async fn timestamps_are_non_decreasing() {
        let repo = InMemoryRepository::new();

        repo.insert(record("abc", "http://example.com", "alice"))
            .await
            .unwrap();

        let before = Timestamp::now();
        repo.push_visit(&shortcut("abc"), visit("1.2.3.4"))
            .await
            .unwrap();
        let after = Timestamp::now();

        let got = repo.get(&shortcut("abc")).await.unwrap().unwrap();
        assert!(got.visitors[0].at >= before);
        assert!(got.visitors[0].at <= after);
    }
}

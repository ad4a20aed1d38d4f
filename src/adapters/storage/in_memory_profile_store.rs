//! In-Memory Profile Store Adapter
//!
//! Keeps the profile in memory. Useful for testing and development; it can
//! also simulate an unavailable store or failing writes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::tracking::UserProfile;
use crate::ports::{ProfileStore, StoreError};

/// In-memory durable store
#[derive(Debug, Clone)]
pub struct InMemoryProfileStore {
    profile: Arc<RwLock<Option<UserProfile>>>,
    available: bool,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            profile: Arc::new(RwLock::new(None)),
            available: true,
            fail_writes: Arc::new(AtomicBool::new(false)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a store that already holds `profile`
    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            profile: Arc::new(RwLock::new(Some(profile))),
            ..Self::new()
        }
    }

    /// Create a store whose `initialize` always fails
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The currently stored profile
    pub async fn snapshot(&self) -> Option<UserProfile> {
        self.profile.read().await.clone()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store disabled".to_string()))
        }
    }

    async fn read_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profile.read().await.clone())
    }

    async fn write_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::IoError("simulated write failure".to_string()));
        }
        *self.profile.write().await = Some(profile.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_starts_empty() {
        let store = InMemoryProfileStore::new();

        store.initialize().await.unwrap();

        assert!(store.read_profile().await.unwrap().is_none());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_memory_store_write_and_read() {
        let store = InMemoryProfileStore::new();
        let profile = UserProfile::new("Ada");

        store.write_profile(&profile).await.unwrap();

        assert_eq!(store.read_profile().await.unwrap(), Some(profile));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_with_profile() {
        let store = InMemoryProfileStore::with_profile(UserProfile::new("Stored"));

        let loaded = store.read_profile().await.unwrap().unwrap();

        assert_eq!(loaded.name(), "Stored");
    }

    #[tokio::test]
    async fn test_memory_store_unavailable() {
        let store = InMemoryProfileStore::unavailable();

        let result = store.initialize().await;

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_memory_store_failing_writes_keep_previous_value() {
        let store = InMemoryProfileStore::with_profile(UserProfile::new("Before"));
        store.set_fail_writes(true);

        let result = store.write_profile(&UserProfile::new("After")).await;

        assert!(result.is_err());
        assert_eq!(store.snapshot().await.unwrap().name(), "Before");
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_state() {
        let store = InMemoryProfileStore::new();
        let handle = store.clone();

        handle.write_profile(&UserProfile::new("Shared")).await.unwrap();

        assert_eq!(store.snapshot().await.unwrap().name(), "Shared");
    }
}

//! Async facade for applications running on tokio
//!
//! Store operations are synchronous file I/O. This wrapper moves each call
//! onto tokio's blocking pool so async callers do not stall their executor.
//! It adds no locking: overlapping mutations of one store still race.

use crate::manager::StoreManager;
use crate::outcome::{AddOutcome, Lookup, PurgeOutcome, RemoveOutcome, SaveOutcome};
use plist::Value;
use std::sync::Arc;
use tokio::task::{JoinError, spawn_blocking};

/// Cloneable async handle over a started [`StoreManager`]
#[derive(Clone, Debug)]
pub struct AsyncStoreManager {
    inner: Arc<StoreManager>,
}

impl AsyncStoreManager {
    pub fn new(manager: StoreManager) -> Self {
        Self {
            inner: Arc::new(manager),
        }
    }

    pub fn manager(&self) -> &StoreManager {
        &self.inner
    }

    async fn run<R, F>(&self, op: F) -> Result<R, JoinError>
    where
        F: FnOnce(&StoreManager) -> R + Send + 'static,
        R: Send + 'static,
    {
        let manager = Arc::clone(&self.inner);
        spawn_blocking(move || op(&manager)).await
    }

    pub async fn add_entry(
        &self,
        value: impl Into<Value>,
        key: impl Into<String>,
        store: impl Into<String>,
    ) -> Result<AddOutcome, JoinError> {
        let (value, key, store) = (value.into(), key.into(), store.into());
        self.run(move |m| m.add_entry(value, &key, &store)).await
    }

    pub async fn save_entry(
        &self,
        value: impl Into<Value>,
        key: impl Into<String>,
        store: impl Into<String>,
    ) -> Result<SaveOutcome, JoinError> {
        let (value, key, store) = (value.into(), key.into(), store.into());
        self.run(move |m| m.save_entry(value, &key, &store)).await
    }

    pub async fn remove_entry(
        &self,
        key: impl Into<String>,
        store: impl Into<String>,
    ) -> Result<RemoveOutcome, JoinError> {
        let (key, store) = (key.into(), store.into());
        self.run(move |m| m.remove_entry(&key, &store)).await
    }

    pub async fn purge_all(&self, store: impl Into<String>) -> Result<PurgeOutcome, JoinError> {
        let store = store.into();
        self.run(move |m| m.purge_all(&store)).await
    }

    pub async fn check_value(
        &self,
        key: impl Into<String>,
        store: impl Into<String>,
    ) -> Result<Lookup, JoinError> {
        let (key, store) = (key.into(), store.into());
        self.run(move |m| m.check_value(&key, &store)).await
    }

    pub async fn key_exists(
        &self,
        key: impl Into<String>,
        store: impl Into<String>,
    ) -> Result<bool, JoinError> {
        let (key, store) = (key.into(), store.into());
        self.run(move |m| m.key_exists(&key, &store)).await
    }

    pub async fn reveal_all(&self, store: impl Into<String>) -> Result<(), JoinError> {
        let store = store.into();
        self.run(move |m| m.reveal_all(&store)).await
    }
}

impl From<StoreManager> for AsyncStoreManager {
    fn from(manager: StoreManager) -> Self {
        Self::new(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Locations;
    use plist::Dictionary;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn async_add_check_remove() {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("bundle");
        fs::create_dir_all(&templates).unwrap();
        Value::Dictionary(Dictionary::new())
            .to_file_xml(templates.join("Settings.plist"))
            .unwrap();

        let mut manager = StoreManager::new(Locations::new(templates, dir.path().join("docs")));
        manager.start_up(["Settings"], false);
        let store = AsyncStoreManager::from(manager);

        assert_eq!(
            store.add_entry("dark", "theme", "Settings").await.unwrap(),
            AddOutcome::Accepted
        );
        assert!(store.key_exists("theme", "Settings").await.unwrap());
        assert_eq!(
            store.check_value("theme", "Settings").await.unwrap(),
            Lookup::Found(Value::from("dark"))
        );
        assert_eq!(
            store.remove_entry("theme", "Settings").await.unwrap(),
            RemoveOutcome::Removed
        );
        assert_eq!(
            store.purge_all("Settings").await.unwrap(),
            PurgeOutcome::AlreadyEmpty
        );
    }
}

use crate::errors::TreeError;
use crate::model::TreeValue;
use crate::options::{SetOptions, StoreOptions};
use crate::store::TreeStore;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Cloneable handle to one [`TreeStore`] behind a single exclusive lock.
/// Each call holds the lock for its whole duration.
#[derive(Clone, Debug, Default)]
pub struct SharedTreeStore {
    inner: Arc<Mutex<TreeStore>>,
}

impl From<TreeStore> for SharedTreeStore {
    fn from(store: TreeStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }
}

impl SharedTreeStore {
    pub fn new(initial: TreeValue) -> Self {
        TreeStore::new(initial).into()
    }

    pub fn with_options(initial: TreeValue, options: StoreOptions) -> Self {
        TreeStore::with_options(initial, options).into()
    }

    /// Runs several edits as one critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut TreeStore) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn get(&self, path: &str) -> Option<TreeValue> {
        self.inner.lock().get(path)
    }

    pub fn get_or(&self, path: &str, default: TreeValue) -> TreeValue {
        self.inner.lock().get_or(path, default)
    }

    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, TreeError> {
        self.inner.lock().get_as(path)
    }

    pub fn has(&self, path: &str) -> bool {
        self.inner.lock().has(path)
    }

    pub fn snapshot(&self) -> TreeValue {
        self.inner.lock().snapshot()
    }

    pub fn set(&self, path: &str, value: TreeValue, options: SetOptions) -> TreeValue {
        self.inner.lock().set(path, value, options)
    }

    pub fn push(&self, path: &str, value: TreeValue) -> Result<TreeValue, TreeError> {
        self.inner.lock().push(path, value)
    }

    pub fn remove(&self, path: &str) -> Option<TreeValue> {
        self.inner.lock().remove(path)
    }

    pub fn reset(&self, to: Option<TreeValue>) -> TreeValue {
        self.inner.lock().reset(to)
    }

    pub fn serialize(&self) -> String {
        self.inner.lock().serialize()
    }
}

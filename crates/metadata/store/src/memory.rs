//! In-memory reference implementation of [`KvStore`].
//!
//! Deterministic and test-friendly: keys iterate in byte order.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::traits::KvStore;
use crate::{StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, BTreeMap<Vec<u8>, Vec<u8>>>> {
        self.entries
            .read()
            .map_err(|_| StoreError::Backend("entries lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, BTreeMap<Vec<u8>, Vec<u8>>>> {
        self.entries
            .write()
            .map_err(|_| StoreError::Backend("entries lock poisoned".to_string()))
    }
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.read()?.contains_key(key))
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        self.write()?.insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StoreResult<()> {
        self.write()?.remove(key);
        Ok(())
    }

    fn iterate_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<(Vec<u8>, Vec<u8>)>> {
        let guard = self.read()?;
        Ok(guard
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

//! Fixed-capacity in-memory store
//!
//! Backs the engine in tests, on the host, and on devices that keep
//! calibration in retained RAM across soft resets. Capacity `N` counts
//! entries across all namespaces and must be a power of two (a
//! `heapless::FnvIndexMap` requirement).

use heapless::{FnvIndexMap, String, Vec};

use super::check_name;
use crate::constants::storage::MAX_KEY_LEN;
use crate::errors::StoreError;
use crate::traits::StateStore;

type Name = String<MAX_KEY_LEN>;
type EntryKey = (Name, Name);

/// In-memory [`StateStore`] with staged writes
///
/// Writes land in a staging map and move to the committed map on `commit`
/// for their namespace; reads only ever see committed values.
#[derive(Debug, Clone)]
pub struct MemoryStore<const N: usize> {
    committed: FnvIndexMap<EntryKey, u32, N>,
    staged: FnvIndexMap<EntryKey, u32, N>,
}

impl<const N: usize> MemoryStore<N> {
    /// Empty store
    pub fn new() -> Self {
        Self {
            committed: FnvIndexMap::new(),
            staged: FnvIndexMap::new(),
        }
    }

    /// Number of committed entries
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// No committed entries
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    fn entry_key(namespace: &str, key: &str) -> Result<EntryKey, StoreError> {
        check_name(namespace)?;
        check_name(key)?;

        let ns = Name::try_from(namespace).map_err(|_| StoreError::InvalidKey)?;
        let key = Name::try_from(key).map_err(|_| StoreError::InvalidKey)?;
        Ok((ns, key))
    }
}

impl<const N: usize> Default for MemoryStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StateStore for MemoryStore<N> {
    fn read_u32(&mut self, namespace: &str, key: &str) -> Result<Option<u32>, StoreError> {
        let key = Self::entry_key(namespace, key)?;
        Ok(self.committed.get(&key).copied())
    }

    fn write_u32(&mut self, namespace: &str, key: &str, value: u32) -> Result<(), StoreError> {
        let key = Self::entry_key(namespace, key)?;
        self.staged
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| StoreError::Full)
    }

    fn commit(&mut self, namespace: &str) -> Result<(), StoreError> {
        check_name(namespace)?;

        let pending: Vec<(EntryKey, u32), N> = self
            .staged
            .iter()
            .filter(|((ns, _), _)| ns.as_str() == namespace)
            .map(|(key, value)| (key.clone(), *value))
            .collect();

        let new_entries = pending
            .iter()
            .filter(|(key, _)| !self.committed.contains_key(key))
            .count();
        if self.committed.len() + new_entries > N {
            return Err(StoreError::Full);
        }

        for (key, value) in pending {
            self.staged.remove(&key);
            self.committed
                .insert(key, value)
                .map_err(|_| StoreError::Full)?;
        }
        Ok(())
    }
}

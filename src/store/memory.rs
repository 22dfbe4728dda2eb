//! In-memory variable store, partitioned by target.

use crate::error::StoreError;
use crate::store::VariableStore;
use crate::types::{EnvironmentTarget, RawEntry};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// Thread-safe in-memory store.
///
/// Hosts seed it directly; a target can be marked unavailable so enumeration
/// fails the way an unreadable platform store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    partitions: RwLock<HashMap<EnvironmentTarget, HashMap<String, Option<String>>>>,
    unavailable: RwLock<HashSet<EnvironmentTarget>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store with one partition pre-populated.
    pub fn with_entries<I, K, V>(target: EnvironmentTarget, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.set(target, key, Some(value.into()));
        }
        store
    }

    pub fn set(&self, target: EnvironmentTarget, key: impl Into<String>, value: Option<String>) {
        self.partitions
            .write()
            .entry(target)
            .or_default()
            .insert(key.into(), value);
    }

    pub fn remove(&self, target: EnvironmentTarget, key: &str) -> Option<Option<String>> {
        self.partitions
            .write()
            .get_mut(&target)
            .and_then(|partition| partition.remove(key))
    }

    /// Make enumeration of `target` fail (or succeed again).
    pub fn set_unavailable(&self, target: EnvironmentTarget, unavailable: bool) {
        let mut set = self.unavailable.write();
        if unavailable {
            set.insert(target);
        } else {
            set.remove(&target);
        }
    }
}

impl VariableStore for MemoryStore {
    fn enumerate(&self, target: EnvironmentTarget) -> Result<Vec<RawEntry>, StoreError> {
        if self.unavailable.read().contains(&target) {
            return Err(StoreError::Unavailable {
                target,
                reason: "partition marked unavailable".to_string(),
            });
        }

        let partitions = self.partitions.read();
        Ok(partitions
            .get(&target)
            .map(|partition| {
                partition
                    .iter()
                    .map(|(key, value)| RawEntry {
                        key: key.clone(),
                        value: value.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

//! ConfigMap: case-insensitive key/value mapping produced by one load.

use crate::normalize::{fold_case, strip_prefix_ignore_case, KEY_DELIMITER};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    key: String,
    value: Option<String>,
}

/// Flat mapping from `:`-delimited keys to optional values.
///
/// Keys compare case-insensitively, char by char. A value of `None` records a key
/// whose value is null, which is distinct from a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMap {
    entries: HashMap<String, Slot>,
}

fn fold(key: &str) -> String {
    fold_case(key)
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value.
    ///
    /// When the key already exists under different casing the value is
    /// replaced and the first-seen casing is kept.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.get_mut(&fold(&key)) {
            Some(slot) => slot.value = value,
            None => {
                self.entries.insert(fold(&key), Slot { key, value });
            }
        }
    }

    /// Look up a key. `Some(None)` means the key exists with a null value.
    pub fn try_get(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .get(&fold(key))
            .map(|slot| slot.value.as_deref())
    }

    /// Value for `key`, treating null values as missing.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.try_get(key).flatten()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries with their stored key casing, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .values()
            .map(|slot| (slot.key.as_str(), slot.value.as_deref()))
    }

    /// Entries sorted by folded key, for stable display.
    pub fn sorted(&self) -> Vec<(&str, Option<&str>)> {
        let mut items: Vec<_> = self.entries.iter().collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
            .into_iter()
            .map(|(_, slot)| (slot.key.as_str(), slot.value.as_deref()))
            .collect()
    }

    /// Immediate child segment names under `parent` (or top-level sections
    /// when `parent` is `None`), de-duplicated case-insensitively and sorted.
    pub fn child_keys(&self, parent: Option<&str>) -> Vec<String> {
        let parent_prefix = parent.map(|p| format!("{}{}", p, KEY_DELIMITER));
        let mut children: BTreeMap<String, String> = BTreeMap::new();

        for slot in self.entries.values() {
            let rest = match &parent_prefix {
                Some(prefix) => match strip_prefix_ignore_case(&slot.key, prefix) {
                    Some(rest) => rest,
                    None => continue,
                },
                None => slot.key.as_str(),
            };
            let segment = rest.split(KEY_DELIMITER).next().unwrap_or(rest);
            children
                .entry(fold(segment))
                .or_insert_with(|| segment.to_string());
        }

        children.into_values().collect()
    }
}

impl FromIterator<(String, Option<String>)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        let mut map = ConfigMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

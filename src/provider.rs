//! Scoped environment provider
//!
//! Loads persisted environment variables for one target, relocates connection
//! string conventions under `ConnectionStrings`, rewrites `__` nesting into `:`
//! paths, applies the optional prefix filter, and publishes the result as an
//! immutable [`ConfigMap`] snapshot.

use crate::config_map::ConfigMap;
use crate::connection_strings::{classify, expand, Classification};
use crate::error::ProviderError;
use crate::normalize::{normalize, strip_prefix_ignore_case};
use crate::store::VariableStore;
use crate::types::{EnvironmentTarget, RawEntry};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Lifecycle of the provider's published data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Constructed, nothing loaded yet
    Idle,
    /// A load is enumerating the store
    Loading,
    /// The most recent load published a new map
    Loaded,
    /// The most recent load failed; earlier data (if any) is still published
    Failed,
}

/// Configuration provider over one persisted partition of a variable store.
pub struct ScopedEnvironmentProvider {
    target: EnvironmentTarget,
    prefix: String,
    normalized_prefix: String,
    store: Arc<dyn VariableStore>,
    data: RwLock<Arc<ConfigMap>>,
    state: RwLock<LoadState>,
}

impl ScopedEnvironmentProvider {
    /// Create a provider for `target`, keeping only keys that start with `prefix`.
    ///
    /// Fails with [`ProviderError::InvalidArgument`] unless `target` is
    /// `User` or `Machine`. No I/O happens here.
    pub fn new(
        store: Arc<dyn VariableStore>,
        target: EnvironmentTarget,
        prefix: Option<&str>,
    ) -> Result<Self, ProviderError> {
        if !target.is_persisted() {
            return Err(ProviderError::InvalidArgument {
                parameter: "target",
                message: format!(
                    "Only Machine and User targets are supported for persisted environment variables, got {}",
                    target
                ),
            });
        }

        let prefix = prefix.unwrap_or_default().to_string();
        let normalized_prefix = normalize(&prefix);

        Ok(Self {
            target,
            prefix,
            normalized_prefix,
            store,
            data: RwLock::new(Arc::new(ConfigMap::new())),
            state: RwLock::new(LoadState::Idle),
        })
    }

    pub fn target(&self) -> EnvironmentTarget {
        self.target
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn state(&self) -> LoadState {
        *self.state.read()
    }

    /// Enumerate the store and publish a fresh map.
    ///
    /// All or nothing: when enumeration fails the previously published map
    /// stays in place and the error names the configured target.
    pub fn load(&self) -> Result<(), ProviderError> {
        *self.state.write() = LoadState::Loading;

        let entries = match self.store.enumerate(self.target) {
            Ok(entries) => entries,
            Err(source) => {
                tracing::warn!(
                    env_target = %self.target,
                    error = %source,
                    "Failed to enumerate environment variables"
                );
                *self.state.write() = LoadState::Failed;
                return Err(ProviderError::LoadFailure {
                    target: self.target,
                    source,
                });
            }
        };

        let raw_count = entries.len();
        let data = self.build_map(entries);
        tracing::debug!(
            env_target = %self.target,
            prefix = %self.prefix,
            raw = raw_count,
            kept = data.len(),
            "Loaded environment variables"
        );

        *self.data.write() = Arc::new(data);
        *self.state.write() = LoadState::Loaded;
        Ok(())
    }

    /// The most recently published map.
    pub fn snapshot(&self) -> Arc<ConfigMap> {
        Arc::clone(&self.data.read())
    }

    /// Case-insensitive lookup; null values read as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.data.read().get(key).map(str::to_string)
    }

    fn build_map(&self, entries: Vec<RawEntry>) -> ConfigMap {
        let mut data = ConfigMap::new();

        for RawEntry { key, value } in entries {
            match classify(&key) {
                Classification::ConnectionString { rule, remainder } => {
                    let (connection_key, provider) = expand(rule, remainder);
                    self.add_if_matches_prefix(&mut data, &connection_key, value);
                    if let Some((provider_key, provider_name)) = provider {
                        self.add_if_matches_prefix(
                            &mut data,
                            &provider_key,
                            Some(provider_name.to_string()),
                        );
                    }
                }
                Classification::Generic => {
                    self.add_if_matches_prefix(&mut data, &normalize(&key), value);
                }
            }
        }

        data
    }

    fn add_if_matches_prefix(&self, data: &mut ConfigMap, normalized_key: &str, value: Option<String>) {
        match strip_prefix_ignore_case(normalized_key, &self.normalized_prefix) {
            Some(stripped) => data.insert(stripped, value),
            None => tracing::trace!(key = normalized_key, "Dropping key outside prefix"),
        }
    }
}

impl fmt::Display for ScopedEnvironmentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ScopedEnvironmentProvider")?;
        if !self.prefix.is_empty() {
            write!(f, " Prefix: '{}'", self.prefix)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ScopedEnvironmentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedEnvironmentProvider")
            .field("target", &self.target)
            .field("prefix", &self.prefix)
            .field("state", &self.state())
            .finish()
    }
}

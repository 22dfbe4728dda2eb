//! Read-only TOML snapshot of persisted variables.
//!
//! ```toml
//! [user]
//! NestedTest__NestedProperty2 = "2024-01-01T00:00:00Z"
//!
//! [machine]
//! MYSQLCONNSTR_main = "server=db;uid=app"
//! ```

use crate::error::StoreError;
use crate::store::VariableStore;
use crate::types::{EnvironmentTarget, RawEntry};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    user: HashMap<String, toml::Value>,
    #[serde(default)]
    machine: HashMap<String, toml::Value>,
}

/// Store backed by a TOML file, re-read on every enumeration.
#[derive(Debug, Clone)]
pub struct SnapshotFileStore {
    path: PathBuf,
}

impl SnapshotFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> Result<Snapshot, StoreError> {
        let content = std::fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            StoreError::Parse(format!("{}: {}", self.path.display(), e))
        })
    }
}

fn scalar_to_string(key: &str, value: toml::Value) -> Result<String, StoreError> {
    match value {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => Err(StoreError::Parse(format!(
            "Variable {} must be a scalar value",
            key
        ))),
    }
}

impl VariableStore for SnapshotFileStore {
    fn enumerate(&self, target: EnvironmentTarget) -> Result<Vec<RawEntry>, StoreError> {
        if !target.is_persisted() {
            return Err(StoreError::Unavailable {
                target,
                reason: "snapshots only hold persisted partitions".to_string(),
            });
        }

        let snapshot = self.read_snapshot()?;
        let partition = match target {
            EnvironmentTarget::User => snapshot.user,
            _ => snapshot.machine,
        };

        partition
            .into_iter()
            .map(|(key, value)| {
                let value = scalar_to_string(&key, value)?;
                Ok(RawEntry::new(key, value))
            })
            .collect()
    }
}

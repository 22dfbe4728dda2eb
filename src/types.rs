//! Core types shared by the loader, the stores and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Partition of the environment variable store.
///
/// Mirrors the three platform partitions. Only `User` and `Machine` are
/// persisted outside the running process, so those are the only targets a
/// [`ScopedEnvironmentProvider`](crate::provider::ScopedEnvironmentProvider)
/// accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentTarget {
    /// Variables inherited by the current process
    Process,
    /// Variables persisted for the current user
    User,
    /// Variables persisted machine-wide
    #[default]
    Machine,
}

impl EnvironmentTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentTarget::Process => "Process",
            EnvironmentTarget::User => "User",
            EnvironmentTarget::Machine => "Machine",
        }
    }

    /// Whether the target names a persisted partition.
    pub fn is_persisted(&self) -> bool {
        matches!(self, EnvironmentTarget::User | EnvironmentTarget::Machine)
    }
}

impl fmt::Display for EnvironmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "process" => Ok(EnvironmentTarget::Process),
            "user" => Ok(EnvironmentTarget::User),
            "machine" => Ok(EnvironmentTarget::Machine),
            other => Err(format!(
                "Unknown environment target: {} (must be 'process', 'user' or 'machine')",
                other
            )),
        }
    }
}

/// One name/value pair enumerated from a variable store.
///
/// `value` is `None` when the store holds the name without a value, which is
/// distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub key: String,
    pub value: Option<String>,
}

impl RawEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

//! Typed application settings bound from the merged configuration tree.
//!
//! Field names are the lower-cased keys produced by the environment sources,
//! so `NestedTest__NestedProperty2` binds to `nested_test.nested_property2`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nested settings section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedSettings {
    #[serde(default, rename = "nestedproperty1")]
    pub nested_property1: Option<String>,

    #[serde(default, rename = "nestedproperty2")]
    pub nested_property2: Option<String>,
}

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default, rename = "property1")]
    pub property1: Option<String>,

    #[serde(default, rename = "nestedtest")]
    pub nested_test: NestedSettings,

    /// Connection strings, including `<name>_providername` companions
    #[serde(default, rename = "connectionstrings")]
    pub connection_strings: BTreeMap<String, Option<String>>,
}

impl AppSettings {
    /// Connection string registered under `name`.
    pub fn connection_string(&self, name: &str) -> Option<&str> {
        self.connection_strings
            .get(&name.to_lowercase())
            .and_then(|value| value.as_deref())
    }

    /// Client library recorded for the connection string `name`, if any.
    pub fn provider_name(&self, name: &str) -> Option<&str> {
        self.connection_string(&format!("{}_providername", name))
    }
}

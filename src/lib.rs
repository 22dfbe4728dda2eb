//! Envscope: persisted environment variables as layered configuration
//!
//! Reads the user or machine partition of an environment variable store,
//! relocates hosting-platform connection string variables under
//! `ConnectionStrings`, rewrites `__` nesting into `:` paths, and publishes
//! the result as a case-insensitive map that can be merged with other
//! sources through the `config` crate.

pub mod config;
pub mod config_map;
pub mod connection_strings;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod provider;
pub mod store;
pub mod tooling;
pub mod types;

pub use config_map::ConfigMap;
pub use error::{ProviderError, StoreError};
pub use provider::{LoadState, ScopedEnvironmentProvider};
pub use store::{MemoryStore, VariableStore};
pub use types::{EnvironmentTarget, RawEntry};

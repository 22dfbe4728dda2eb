//! Variable stores
//!
//! Sources of raw name/value pairs, partitioned by [`EnvironmentTarget`].
//! The provider only enumerates; writing a store is left to whatever owns it.
//!
//! [`EnvironmentTarget`]: crate::types::EnvironmentTarget

pub mod contract;
pub mod memory;
pub mod snapshot;

pub use contract::VariableStore;
pub use memory::MemoryStore;
pub use snapshot::SnapshotFileStore;

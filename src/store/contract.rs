use crate::error::StoreError;
use crate::types::{EnvironmentTarget, RawEntry};
use std::fmt::Debug;

/// Enumerates the variables held in one partition of a store.
///
/// Names are unique within one enumeration; order is unspecified.
pub trait VariableStore: Send + Sync + Debug {
    fn enumerate(&self, target: EnvironmentTarget) -> Result<Vec<RawEntry>, StoreError>;
}

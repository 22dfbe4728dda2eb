//! Layered configuration integration
//!
//! Plugs the scoped environment provider into the `config` crate and binds
//! the merged tree onto typed settings.

pub mod facade;
pub mod merge;
pub mod settings;
pub mod sources;

pub use facade::SettingsLoader;
pub use merge::service::{MergeOptions, MergeService};
pub use settings::{AppSettings, NestedSettings};
pub use sources::scoped_environment::ScopedEnvironmentSource;

//! SettingsLoader facade delegating to merge service.

use super::merge::service::{MergeOptions, MergeService};
use super::AppSettings;
use crate::store::VariableStore;
use crate::types::EnvironmentTarget;
use config::ConfigError;
use std::path::Path;
use std::sync::Arc;

/// Settings loader facade.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from the process environment and persisted variables of `target`.
    pub fn load(
        store: Arc<dyn VariableStore>,
        target: EnvironmentTarget,
    ) -> Result<AppSettings, ConfigError> {
        MergeService::load(
            store,
            &MergeOptions {
                target,
                ..MergeOptions::default()
            },
        )
    }

    /// Load settings from a specific file with environment overlays.
    pub fn load_from_file(
        store: Arc<dyn VariableStore>,
        path: &Path,
        target: EnvironmentTarget,
    ) -> Result<AppSettings, ConfigError> {
        MergeService::load(
            store,
            &MergeOptions {
                file: Some(path.to_path_buf()),
                target,
                ..MergeOptions::default()
            },
        )
    }
}

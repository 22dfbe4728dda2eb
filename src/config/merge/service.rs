//! MergeService: orchestrates sources and deserializes to AppSettings.

use crate::config::sources::{environment, scoped_environment};
use crate::config::AppSettings;
use crate::store::VariableStore;
use crate::types::EnvironmentTarget;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use std::path::PathBuf;
use std::sync::Arc;

/// Inputs for one settings merge.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Optional settings file (format inferred from the extension)
    pub file: Option<PathBuf>,
    /// Whether the process environment is layered in
    pub process_environment: bool,
    /// Persisted partition read last
    pub target: EnvironmentTarget,
    /// Prefix filter for the persisted variables
    pub prefix: Option<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            file: None,
            process_environment: true,
            target: EnvironmentTarget::Machine,
            prefix: None,
        }
    }
}

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Compose sources into a builder.
    /// Precedence: settings file (lowest) -> process environment -> persisted variables (highest).
    pub fn builder(
        store: Arc<dyn VariableStore>,
        options: &MergeOptions,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = &options.file {
            builder = builder.add_source(File::from(path.as_path()));
        }

        if options.process_environment {
            builder = environment::add_to_builder(builder)?;
        }

        match options.prefix.as_deref() {
            Some(prefix) => scoped_environment::add_to_builder_with_prefix(
                builder,
                store,
                prefix,
                options.target,
            ),
            None => scoped_environment::add_to_builder(builder, store, options.target),
        }
    }

    /// Build the merged tree and bind it.
    pub fn load(
        store: Arc<dyn VariableStore>,
        options: &MergeOptions,
    ) -> Result<AppSettings, ConfigError> {
        let config = Self::builder(store, options)?.build()?;
        tracing::debug!(
            target_partition = %options.target,
            file = ?options.file,
            "Merged configuration sources"
        );
        config.try_deserialize()
    }
}

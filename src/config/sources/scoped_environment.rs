//! Scoped environment source for `config::ConfigBuilder`.
//!
//! Keys published by the provider use `:` paths with their original casing.
//! When collected into a `config` tree each `:` segment becomes one lower-cased
//! table level, the same shape `config::Environment` produces, so
//! `ConnectionStrings:main` is read back as `connectionstrings.main`.
//! Segments are inserted as literal table keys, so a `.` inside a segment
//! (`SQLCONNSTR_orders.primary`) stays part of the name.

use crate::error::ProviderError;
use crate::normalize::KEY_DELIMITER;
use crate::provider::ScopedEnvironmentProvider;
use crate::store::VariableStore;
use crate::types::EnvironmentTarget;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Map, Source, Value, ValueKind};
use std::sync::Arc;

/// Describes which partition to read and how to filter it.
#[derive(Debug, Clone)]
pub struct ScopedEnvironmentSource {
    /// Partition to read; defaults to `Machine`
    pub target: EnvironmentTarget,
    /// Only keys starting with this prefix are kept, with the prefix removed
    pub prefix: Option<String>,
    store: Arc<dyn VariableStore>,
}

impl ScopedEnvironmentSource {
    pub fn new(store: Arc<dyn VariableStore>) -> Self {
        Self {
            target: EnvironmentTarget::default(),
            prefix: None,
            store,
        }
    }

    pub fn target(mut self, target: EnvironmentTarget) -> Self {
        self.target = target;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Build an unloaded provider for this source.
    pub fn build(&self) -> Result<ScopedEnvironmentProvider, ProviderError> {
        ScopedEnvironmentProvider::new(
            Arc::clone(&self.store),
            self.target,
            self.prefix.as_deref(),
        )
    }
}

/// Lower-cased table path for a `:`-delimited key.
pub fn config_segments(key: &str) -> Vec<String> {
    key.split(KEY_DELIMITER).map(str::to_lowercase).collect()
}

fn empty_table(origin: &str) -> Value {
    Value::new(Some(&origin.to_string()), ValueKind::Table(Map::new()))
}

/// Insert `leaf` at `path` below `table`, creating intermediate tables.
///
/// A scalar standing where a table is needed is replaced by the table, and a
/// scalar never replaces an existing table, so `A` and `A:B` both present
/// always yield the nested `a.b`.
fn insert_path(table: &mut Map<String, Value>, path: &[String], leaf: Value, origin: &str) {
    let (head, rest) = match path.split_first() {
        Some(split) => split,
        None => return,
    };

    if rest.is_empty() {
        let has_table = table
            .get(head)
            .is_some_and(|existing| matches!(existing.kind, ValueKind::Table(_)));
        if !has_table {
            table.insert(head.clone(), leaf);
        }
        return;
    }

    let node = table
        .entry(head.clone())
        .or_insert_with(|| empty_table(origin));
    if !matches!(node.kind, ValueKind::Table(_)) {
        *node = empty_table(origin);
    }
    if let ValueKind::Table(ref mut children) = node.kind {
        insert_path(children, rest, leaf, origin);
    }
}

impl Source for ScopedEnvironmentSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let provider = self.build()?;
        provider.load()?;

        let origin = provider.to_string();
        let data = provider.snapshot();
        let mut collected = Map::new();
        for (key, value) in data.sorted() {
            let kind = match value {
                Some(value) => ValueKind::String(value.to_string()),
                None => ValueKind::Nil,
            };
            insert_path(
                &mut collected,
                &config_segments(key),
                Value::new(Some(&origin), kind),
                &origin,
            );
        }
        Ok(collected)
    }
}

/// Add the persisted variables of `target` to the builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    store: Arc<dyn VariableStore>,
    target: EnvironmentTarget,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    add_to_builder_with(builder, store, |source| source.target = target)
}

/// Add the persisted variables of `target` that start with `prefix`.
pub fn add_to_builder_with_prefix(
    builder: ConfigBuilder<DefaultState>,
    store: Arc<dyn VariableStore>,
    prefix: &str,
    target: EnvironmentTarget,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    add_to_builder_with(builder, store, |source| {
        source.target = target;
        source.prefix = Some(prefix.to_string());
    })
}

/// Add a source configured by `configure`.
///
/// The target is validated here so an unsupported partition fails before the
/// builder is ever built.
pub fn add_to_builder_with<F>(
    builder: ConfigBuilder<DefaultState>,
    store: Arc<dyn VariableStore>,
    configure: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: FnOnce(&mut ScopedEnvironmentSource),
{
    let mut source = ScopedEnvironmentSource::new(store);
    configure(&mut source);
    source.build()?;
    Ok(builder.add_source(source))
}

//! CLI Tooling
//!
//! Loads persisted variables for one target and prints what the provider
//! publishes, or the typed settings after the layered merge.

use crate::config::{MergeOptions, MergeService};
use crate::provider::ScopedEnvironmentProvider;
use crate::store::{SnapshotFileStore, VariableStore};
use crate::types::EnvironmentTarget;
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Envscope CLI - persisted environment variables as layered configuration
#[derive(Parser)]
#[command(name = "envscope")]
#[command(about = "Load persisted environment variables into a layered configuration tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Variable snapshot file (defaults to the platform config directory)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Partition to read (user or machine)
    #[arg(long, default_value = "machine")]
    pub target: EnvironmentTarget,

    /// Keep only keys starting with this prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show every loaded key and value
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the value of one key
    Get {
        /// Key, using ':' between sections
        key: String,
    },
    /// List the child sections under a key (top level when omitted)
    Sections {
        parent: Option<String>,
    },
    /// Merge all sources and print the bound settings as JSON
    Settings {
        /// Settings file layered underneath the environment
        #[arg(long)]
        file: Option<PathBuf>,
        /// Skip the process environment layer
        #[arg(long)]
        no_process_env: bool,
    },
}

/// Default snapshot location: `<config dir>/envscope/variables.toml`.
pub fn default_store_path() -> anyhow::Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("", "envscope", "envscope")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;
    Ok(project_dirs.config_dir().join("variables.toml"))
}

/// Execution context shared by all commands.
pub struct CliContext {
    store: Arc<dyn VariableStore>,
    target: EnvironmentTarget,
    prefix: Option<String>,
}

impl CliContext {
    /// Create a context over the snapshot at `store_path` (or the default location).
    pub fn new(
        store_path: Option<PathBuf>,
        target: EnvironmentTarget,
        prefix: Option<String>,
    ) -> anyhow::Result<Self> {
        let path = match store_path {
            Some(path) => path,
            None => default_store_path()?,
        };
        Ok(Self::with_store(
            Arc::new(SnapshotFileStore::new(path)),
            target,
            prefix,
        ))
    }

    /// Create a context over any store.
    pub fn with_store(
        store: Arc<dyn VariableStore>,
        target: EnvironmentTarget,
        prefix: Option<String>,
    ) -> Self {
        Self {
            store,
            target,
            prefix,
        }
    }

    fn load_provider(&self) -> anyhow::Result<ScopedEnvironmentProvider> {
        let provider = ScopedEnvironmentProvider::new(
            Arc::clone(&self.store),
            self.target,
            self.prefix.as_deref(),
        )?;
        provider
            .load()
            .with_context(|| format!("Loading {}", provider))?;
        Ok(provider)
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> anyhow::Result<String> {
        tracing::info!(command = ?command, target_partition = %self.target, "Executing command");
        match command {
            Commands::Show { format } => {
                let provider = self.load_provider()?;
                format_entries(&provider, format)
            }
            Commands::Get { key } => {
                let provider = self.load_provider()?;
                let data = provider.snapshot();
                match data.try_get(key) {
                    Some(Some(value)) => Ok(value.to_string()),
                    Some(None) => Ok(String::new()),
                    None => Err(anyhow!("Key not found: {}", key)),
                }
            }
            Commands::Sections { parent } => {
                let provider = self.load_provider()?;
                Ok(provider.snapshot().child_keys(parent.as_deref()).join("\n"))
            }
            Commands::Settings {
                file,
                no_process_env,
            } => {
                let options = MergeOptions {
                    file: file.clone(),
                    process_environment: !no_process_env,
                    target: self.target,
                    prefix: self.prefix.clone(),
                };
                let settings = MergeService::load(Arc::clone(&self.store), &options)
                    .context("Merging configuration sources")?;
                Ok(serde_json::to_string_pretty(&settings)?)
            }
        }
    }
}

fn format_entries(provider: &ScopedEnvironmentProvider, format: &str) -> anyhow::Result<String> {
    let data = provider.snapshot();
    let entries = data.sorted();

    if format == "json" {
        let object: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(key, value)| {
                let value = value
                    .map(|v| serde_json::Value::String(v.to_string()))
                    .unwrap_or(serde_json::Value::Null);
                (key.to_string(), value)
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&object)?);
    }
    if format != "text" {
        return Err(anyhow!("Invalid format: {} (must be 'text' or 'json')", format));
    }

    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Key", "Value"]);
    for (key, value) in &entries {
        table.add_row(vec![*key, value.unwrap_or("<null>")]);
    }
    Ok(format!("{}\n{}", provider, table))
}

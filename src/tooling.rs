//! Tooling layer
//!
//! Command-line access to the provider and the merged settings.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};

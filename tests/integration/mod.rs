//! Integration tests for the scoped environment configuration provider

mod cli_parse;
mod concurrent_reload;
mod layered_merge;

//! Envscope CLI Binary
//!
//! Command-line interface for the scoped environment configuration provider.

use clap::Parser;
use envscope::logging::{init_logging, LoggingConfig};
use envscope::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let context = match CliContext::new(cli.store.clone(), cli.target, cli.prefix.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing store: {:#}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

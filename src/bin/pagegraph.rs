//! Pagegraph CLI Binary
//!
//! Command-line interface for building and querying the page graph.

use clap::Parser;
use pagegraph::logging::init_logging;
use pagegraph::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.cwd.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let logging = cli.logging_config(&context.config().logging);
    let site = context.paths().ok().map(|paths| paths.cwd);
    if let Err(e) = init_logging(Some(&logging), site.as_deref()) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

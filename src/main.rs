// Allow common clippy pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! Solidafy adapter CLI
//!
//! Command-line tooling for datasource adapter authors

use clap::Parser;
use solidafy_adapter::cli::{Cli, Runner};

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

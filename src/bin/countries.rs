//! Interactive country dataset manager.
//!
//! Usage:
//!   countries
//!   countries --file data/paises_base.csv
//!   countries --log-level debug
//!
//! Loads the dataset at startup, then runs the menu on stdin/stdout.
//! Diagnostics and logs go to stderr.

use clap::Parser;
use countries_rs::config::DEFAULT_LOG_LEVEL;
use countries_rs::{Settings, Shell};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let settings = Settings::parse();
    init_tracing(&settings.log_level);

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), &settings);
    if let Err(e) = shell.run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

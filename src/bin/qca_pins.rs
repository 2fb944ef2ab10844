// CLASSIFICATION: COMMUNITY
// Filename: qca_pins.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Entry point for the `qca-pins` inspector.

use clap::Parser;
use qca_board::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();
    if let Err(err) = cli::run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

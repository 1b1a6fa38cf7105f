//! ## minnesvakt-cli
//! **Sample driver for the tracked-memory registry**
//!
//! Thin operational shell around `minnesvakt-core`: loads configuration,
//! initializes logging, and runs the demo scenarios. All printing happens
//! here; the core only ever writes into sinks this driver provides.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    commands::run_command(cli)
}

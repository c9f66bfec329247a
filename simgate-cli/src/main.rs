//! ## simgate-cli
//! **Operational interface to the simulation catalog**
//!
//! Lists simulations, inspects version maps, resolves version labels, and
//! dry-runs parameter validation exactly as the gateway would for a real
//! submission.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::run_command(cli)
}

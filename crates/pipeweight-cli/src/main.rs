//! Pipe Weight - weight and price estimation for SS/MS pipes
//!
//! Computes totals locally from the spec table or through a running
//! calculation endpoint.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

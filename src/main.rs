mod aggregate_cmd;
mod cli;
mod clip_cmd;
mod config;
mod convert;
mod dissolve_cmd;
mod logging;
mod summarize_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Dissolve(args) => dissolve_cmd::run(args),
        Command::Clip(args) => clip_cmd::run(args),
        Command::Aggregate(args) => aggregate_cmd::run(args),
        Command::Summarize(args) => summarize_cmd::run(args),
    }
}

use anyhow::Result;
use clap::Parser;

mod args;
mod config;
mod inspect;
mod pack;
mod streams;

use args::{Cli, Command};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Build(args) => pack::run(&args),
        Command::Inspect(args) => inspect::run(&args),
    }
}

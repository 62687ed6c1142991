use anyhow::Result;
use clap::Parser;

use appfinder::cli::Cli;

fn main() -> Result<()> {
    appfinder::app::run(Cli::parse())
}

use anyhow::Result;
use clap::Parser;

use statebounds::cli::{Cli, Commands};
use statebounds::commands::{generate, plot};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate(args) => generate::run(&cli, args),
        Commands::Plot(args) => plot::run(&cli, args),
    }
}

//! makeplan CLI - Compile declarative build plans into Makefiles

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.global.verbose {
        EnvFilter::new("makeplan=debug")
    } else {
        EnvFilter::new("makeplan=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &cli.global),
        Commands::Rules(args) => commands::rules::execute(args, &cli.global),
        Commands::Init(args) => commands::init::execute(args, &cli.global),
    }
}

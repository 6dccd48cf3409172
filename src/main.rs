use anyhow::{format_err, Result};
use auction_registry::{config::Config, shell::Shell, AuctionSystem};
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| format_err!("failed to install logger: {e}"))?;

    ctrlc::set_handler(|| {
        eprintln!("Stopping auction shell...");
        std::process::exit(130);
    })?;

    let mut system = AuctionSystem::with_system_clock();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(&mut system, stdin.lock(), stdout.lock()).json(config.json);
    if !config.no_banner {
        shell.print_banner()?;
    }
    shell.run()
}

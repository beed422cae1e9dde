//! kconf - Main entry point

use clap::Parser;
use log::{debug, info};

use kconf::{run_command, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting kconf v{}", env!("CARGO_PKG_VERSION"));
    debug!("CLI args: {:?}", cli);

    if let Err(e) = run_command(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

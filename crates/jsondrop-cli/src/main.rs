//! jsondrop CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use jsondrop_cli::cli::Cli;
use jsondrop_cli::commands;

fn main() {
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let command = cli.command.clone().unwrap_or_default();
    if let Err(e) = commands::execute(command, &cli.dir, &mut std::io::stdout()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

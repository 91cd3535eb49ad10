mod amounts;
mod categorizer;
mod cli;
mod dates;
mod error;
mod exporter;
mod importer;
mod models;
mod reports;
mod settings;

use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use error::Result;
use settings::{expand_home, load_settings, Settings};

fn init_logging(settings: &Settings, verbose: bool) -> Result<()> {
    // Priority: RUST_LOG env var > --verbose flag > settings log_level
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        settings.log_filter()?
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(settings.color && std::io::stderr().is_terminal())
                .with_target(false)
                .compact(),
        )
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref().map(expand_home);
    let settings = load_settings(config_path.as_deref())?;
    if !settings.color {
        colored::control::set_override(false);
    }
    init_logging(&settings, cli.verbose)?;

    match cli.command {
        Commands::Report {
            input_csv,
            output_clean,
        } => cli::report::run(&input_csv, output_clean.as_deref()),
        Commands::Rules => cli::rules::list(),
        Commands::Categorize { merchant } => cli::categorize::run(&merchant),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

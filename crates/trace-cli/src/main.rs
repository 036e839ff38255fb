use eyre::Result;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use cli::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse_args();
    init_tracing(cli.verbose, cli.json_logs);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_path()?,
    };

    commands::run(cli.command, &config_path)
}

/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

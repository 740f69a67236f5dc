use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use phone_account::cli::{self, Cli};
use phone_account::config::PhoneAccountConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Config picks the log level, so it is read before tracing is up.
    let loaded = PhoneAccountConfig::load(&cli.config);
    let log_level = loaded
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with_writer(std::io::stderr)
        .init();

    let config = loaded.unwrap_or_else(|e| {
        warn!("{}. Using defaults.", e);
        PhoneAccountConfig::default()
    });

    cli::run(cli.command, &config)
}

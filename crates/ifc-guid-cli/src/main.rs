//! ifcguid - convert IFC GUIDs between the compact and canonical forms.

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod bench;
mod commands;
mod config;
mod output;

use commands::Cli;
use config::{Config, LogFormat};

fn init_tracing(config: &Config) {
    // Prefer RUST_LOG, fall back to --log-level / IFCGUID_LOG
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    init_tracing(&config);
    debug!(?config, "Configuration loaded");

    match cli.run(&config) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

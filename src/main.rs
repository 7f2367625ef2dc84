//! Deckwright Server Binary
//!
//! This binary starts the Deckwright HTTP service that builds slide
//! presentations from JSON requests.
//!
//! # Usage
//!
//! ```bash
//! # Start with settings from ~/.config/Deckwright/config.toml (or defaults: 127.0.0.1:8000)
//! deckwright
//!
//! # Override listener and starting theme
//! deckwright --host 0.0.0.0 --port 8080 --theme dark
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deckwright::config::Config;
use deckwright::constants::{APP_BINARY_NAME, APP_NAME};
use deckwright::web;

/// Deckwright - HTTP service for building slide presentations
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Theme active at startup (overrides the config file)
    #[arg(short, long)]
    theme: Option<String>,

    /// Configuration file.
    /// Defaults to the platform-specific location:
    /// - Linux: ~/.config/Deckwright/config.toml
    /// - macOS: ~/Library/Application Support/Deckwright/config.toml
    /// - Windows: %APPDATA%\Deckwright\config.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Loads the configuration file and applies command-line overrides.
fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(theme) = &args.theme {
        config.presentation.default_theme.clone_from(theme);
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = resolve_config(&args).context("Invalid configuration")?;

    info!(
        "{} v{} (theme: {})",
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        config.presentation.default_theme
    );

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.bind_address()))?;

    web::run_server(config, addr).await
}

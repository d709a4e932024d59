//! Herald console host
//!
//! Runs the command engine behind a line-oriented console so commands can be
//! typed the way a player would type them in chat.
//!
//! ```bash
//! cargo run -p herald-cli -- --player Steve --grant shop.buy --grant guild.invite
//! ```
//!
//! Set `RUST_LOG=herald_core=debug` to watch resolution and dispatch.

mod args;
mod console;
mod demo;

use args::Cli;
use clap::Parser;
use herald_core::commands::CommandEngine;
use herald_core::config::LoggingConfig;
use herald_core::sender::{ConsoleSender, SharedSender};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    init_logging(&config.logging);

    let engine = Arc::new(CommandEngine::with_manifest(config)?);
    let registered = demo::register(&engine)?;
    info!(registered, "demo commands registered");

    let sender: SharedSender = match &cli.player {
        Some(name) => Arc::new(console::ConsolePlayer::new(name.clone(), cli.grants.clone())),
        None => Arc::new(ConsoleSender::stdout()),
    };

    let result = console::run(&engine, sender);
    engine.shutdown();
    Ok(result?)
}

/// Logs go to stderr so they never interleave with command replies
fn init_logging(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.pretty().init(),
    }
}

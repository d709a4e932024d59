//! CLI argument definitions using clap

use anyhow::Context;
use clap::Parser;
use herald_core::config::EngineConfig;
use std::path::PathBuf;

/// Roots the built-in demo commands live under
pub const DEMO_ROOTS: [&str; 3] = ["shop", "guild", "herald"];

#[derive(Parser, Debug)]
#[command(name = "heraldctl")]
#[command(about = "Herald - interactive console host for the command engine")]
#[command(
    long_about = r#"Herald - interactive console host for the command engine

Type commands as a player would, with or without the leading slash:
  shop buy diamond 2
  /guild invite Steve

Ask for completions with `complete <partial line>`, quit with `quit`."#
)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML engine configuration
    #[arg(long, env = "HERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Worker threads for asynchronous commands (overrides the config file)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Default log filter (overrides the config file; RUST_LOG wins over both)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Act as an interactive player with this name instead of the console
    #[arg(long)]
    pub player: Option<String>,

    /// Permission node granted to the player (repeatable)
    #[arg(long = "grant", value_name = "PERMISSION", requires = "player")]
    pub grants: Vec<String>,
}

impl Cli {
    /// Load the config file (or defaults) and apply command-line overrides
    pub fn load_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EngineConfig::default().with_declared_roots(DEMO_ROOTS),
        };

        if let Some(workers) = self.workers {
            config.worker_threads = workers;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_declare_demo_roots() {
        let cli = Cli::parse_from(["heraldctl"]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.declared_roots, DEMO_ROOTS);
        assert_eq!(config.worker_threads, 4);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["heraldctl", "--workers", "2", "--log-level", "debug"]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.worker_threads, 2);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_zero_workers_rejected() {
        let cli = Cli::parse_from(["heraldctl", "--workers", "0"]);
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_grant_requires_player() {
        assert!(Cli::try_parse_from(["heraldctl", "--grant", "shop.buy"]).is_err());

        let cli = Cli::try_parse_from([
            "heraldctl",
            "--player",
            "Steve",
            "--grant",
            "shop.buy",
            "--grant",
            "guild.invite",
        ])
        .unwrap();
        assert_eq!(cli.player.as_deref(), Some("Steve"));
        assert_eq!(cli.grants, vec!["shop.buy", "guild.invite"]);
    }
}

//! Engine configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::messages::MessagesConfig;
use crate::error::ConfigError;

/// Top-level engine configuration, loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker threads for asynchronous commands
    pub worker_threads: usize,
    /// Completion result caching
    pub completion_cache: CompletionCacheConfig,
    /// Sender-visible texts
    pub messages: MessagesConfig,
    /// Roots the host pre-declares (its command manifest)
    pub declared_roots: Vec<String>,
    /// Logging setup used by the CLI
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: 4,
            completion_cache: CompletionCacheConfig::default(),
            messages: MessagesConfig::default(),
            declared_roots: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        config.validate()?;

        debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_threads == 0 {
            return Err(ConfigError::invalid("worker_threads must be at least 1"));
        }
        if self.completion_cache.enabled() && self.completion_cache.max_entries == 0 {
            return Err(ConfigError::invalid(
                "completion_cache.max_entries must be at least 1 when caching is enabled",
            ));
        }
        if self.declared_roots.iter().any(|root| root.trim().is_empty()) {
            return Err(ConfigError::invalid("declared_roots must not contain blank roots"));
        }
        if self.declared_roots.iter().any(|root| root.split_whitespace().count() > 1) {
            return Err(ConfigError::invalid(
                "declared_roots entries must be single tokens",
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "compact" | "json") {
            return Err(ConfigError::invalid(format!(
                "logging.format must be pretty, compact or json, got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// Override the worker thread count
    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    /// Override the declared roots
    pub fn with_declared_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_roots = roots.into_iter().map(Into::into).collect();
        self
    }
}

/// Completion cache settings; a zero TTL disables caching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionCacheConfig {
    /// Entry lifetime in milliseconds
    pub ttl_ms: u64,
    /// Maximum cached queries
    pub max_entries: usize,
}

impl Default for CompletionCacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 5000,
            max_entries: 256,
        }
    }
}

impl CompletionCacheConfig {
    /// A config with no caching
    pub fn disabled() -> Self {
        Self {
            ttl_ms: 0,
            max_entries: 0,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn enabled(&self) -> bool {
        self.ttl_ms > 0
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, compact, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

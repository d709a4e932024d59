//! Core error types for Herald

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Herald operations
pub type HeraldResult<T> = Result<T, HeraldError>;

/// Failure of a single registration call
///
/// Fatal to the call only; the registry is left unchanged and the caller
/// may fix the definition and retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The command path is empty or only whitespace
    #[error("Invalid command path: '{path}'")]
    InvalidPath { path: String },

    /// Another command already owns this path
    #[error("Command path already registered: '{path}'")]
    DuplicatePath { path: String },

    /// A bound method does not have the `(sender, args)` shape
    #[error("Invalid handler signature for '{path}': {reason}")]
    InvalidSignature { path: String, reason: String },
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::EngineConfig`]
    #[error("Failed to parse config: {source}")]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },

    /// The config parsed but violates an invariant
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Returned by the worker pool once it has been shut down
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Worker pool is shut down")]
pub struct PoolClosed;

/// Errors from the argument accessors on [`crate::commands::CommandContext`]
///
/// Handlers usually propagate these with `?`; the dispatcher then reports a
/// generic failure to the sender.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Missing argument #{}", .index + 1)]
    Missing { index: usize },

    #[error("Invalid argument #{}: '{}' is not a valid {}", .index + 1, .value, .expected)]
    Invalid {
        index: usize,
        value: String,
        expected: &'static str,
    },
}

/// Main error type for Herald
#[derive(Error, Debug)]
pub enum HeraldError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pool(#[from] PoolClosed),

    /// The worker pool runtime could not be built
    #[error("Failed to start worker pool: {0}")]
    PoolStart(#[source] std::io::Error),
}

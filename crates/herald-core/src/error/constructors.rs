//! Constructor and accessor methods for error types

use super::types::{ConfigError, RegistrationError};

impl RegistrationError {
    /// Create a new invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a new duplicate path error
    pub fn duplicate_path(path: impl Into<String>) -> Self {
        Self::DuplicatePath { path: path.into() }
    }

    /// Create a new invalid signature error
    pub fn invalid_signature(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSignature {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The path the failed registration was for
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidPath { path }
            | Self::DuplicatePath { path }
            | Self::InvalidSignature { path, .. } => path,
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPath { .. } => "INVALID_PATH",
            Self::DuplicatePath { .. } => "DUPLICATE_PATH",
            Self::InvalidSignature { .. } => "INVALID_SIGNATURE",
        }
    }
}

impl ConfigError {
    /// Create a new invalid configuration error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

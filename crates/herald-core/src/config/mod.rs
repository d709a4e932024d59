//! Configuration management for Herald

mod engine_config;
mod messages;

pub use engine_config::{CompletionCacheConfig, EngineConfig, LoggingConfig};
pub use messages::MessagesConfig;

#[cfg(test)]
mod tests;

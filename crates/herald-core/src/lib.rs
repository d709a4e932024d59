//! Herald Core Library
//!
//! This crate provides the command engine for plugin hosts: a concurrent
//! registry of commands, longest-match resolution, permission and
//! sender-kind gating, synchronous and worker-pool dispatch, and tab
//! completion over the same routing table.

pub mod commands;
pub mod config;
pub mod error;
pub mod sender;

// Re-export commonly used types
pub use commands::{
    CommandDescriptor, CommandEngine, CommandHost, CommandSet, CommandTable, DispatchOutcome,
    HandlerBinding, HandlerResult, ManifestHost, OpenHost, Registry, Resolution,
};
pub use config::EngineConfig;
pub use error::{HeraldError, HeraldResult, RegistrationError};
pub use sender::{CommandSender, ConsoleSender, MemorySender, PlayerSender, SenderKind, SharedSender};

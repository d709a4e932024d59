//! Sender capability abstraction
//!
//! The engine never depends on a concrete actor type. Everything it needs
//! from whoever typed a command goes through [`CommandSender`]: sending text,
//! checking a permission node, and telling interactive senders (players)
//! apart from generic ones (console, command blocks, remote shells).
//!
//! Senders are borrowed per call. Asynchronous dispatch clones the
//! [`SharedSender`] into the worker task for that task's lifetime only.

mod console;
mod memory;

pub use console::ConsoleSender;
pub use memory::MemorySender;

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Capability tag distinguishing interactive senders from generic ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SenderKind {
    /// A player or other interactive actor
    Interactive,
    /// Console, automation, or any non-interactive actor
    Generic,
}

impl fmt::Display for SenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interactive => write!(f, "interactive"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

/// An actor that can invoke commands
pub trait CommandSender: Send + Sync {
    /// Display name, used in logs
    fn name(&self) -> &str;

    /// Stable identifier distinguishing this sender from others
    ///
    /// Defaults to the display name; senders whose names are not unique
    /// should override it.
    fn id(&self) -> String {
        self.name().to_string()
    }

    /// Deliver one line of text to the sender
    fn send_message(&self, message: &str);

    /// Check a permission node
    fn has_permission(&self, permission: &str) -> bool;

    /// Narrow to the interactive capability set, if this sender has it
    fn as_interactive(&self) -> Option<&dyn PlayerSender> {
        None
    }

    /// Capability tag for this sender
    fn kind(&self) -> SenderKind {
        if self.as_interactive().is_some() {
            SenderKind::Interactive
        } else {
            SenderKind::Generic
        }
    }
}

/// The interactive capability set
pub trait PlayerSender: CommandSender {
    /// Unique id of the interactive actor
    fn unique_id(&self) -> Uuid;
}

/// Shared sender handle passed into the engine
pub type SharedSender = Arc<dyn CommandSender>;

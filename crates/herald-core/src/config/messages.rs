//! Sender-visible message texts

use serde::{Deserialize, Serialize};

/// Fixed texts the engine sends to senders
///
/// Every terminal outcome of an invocation sends at most one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Sent when the sender lacks the command's permission
    pub permission_denied: String,
    /// Sent when a player-only command is used by a generic sender
    pub wrong_sender: String,
    /// Sent when a handler fails or panics
    pub handler_error: String,
    /// Sent when an unknown sub-path has no reachable commands to list
    pub no_commands: String,
    /// First line of the fallback listing
    pub listing_header: String,
    /// Sent for invocations after shutdown
    pub shutting_down: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            permission_denied: "You do not have permission to use this command.".to_string(),
            wrong_sender: "This command can only be used by players.".to_string(),
            handler_error: "An error occurred while executing this command.".to_string(),
            no_commands: "No commands available.".to_string(),
            listing_header: "Available commands:".to_string(),
            shutting_down: "Commands are unavailable while the server shuts down.".to_string(),
        }
    }
}

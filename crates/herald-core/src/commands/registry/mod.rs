//! Command registry
//!
//! This module provides the concurrent routing table: registration with
//! validation and duplicate detection, root bookkeeping toward the host,
//! owner-based bulk removal, and per-root custom completers.

mod host;
mod table;
mod types;


pub use host::{CommandHost, ManifestHost, OpenHost, RootClaim};
pub use table::{CommandMethod, CommandSet, CommandSpec, CommandTable};
pub use types::{CommandEntry, Completer, OwnerId, Registry, RootState};

#[cfg(test)]
pub use host::MockCommandHost;

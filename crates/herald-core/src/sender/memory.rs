//! In-memory sender that records what it is told
//!
//! Useful for embedding hosts that relay output elsewhere, and for tests.

use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use uuid::Uuid;

use super::{CommandSender, PlayerSender, SenderKind};

/// A sender that stores every message it receives
#[derive(Debug)]
pub struct MemorySender {
    name: String,
    kind: SenderKind,
    unique_id: Uuid,
    all_permissions: bool,
    permissions: RwLock<HashSet<String>>,
    messages: Mutex<Vec<String>>,
}

impl MemorySender {
    /// A generic sender with no permissions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SenderKind::Generic,
            unique_id: Uuid::new_v4(),
            all_permissions: false,
            permissions: RwLock::new(HashSet::new()),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// An interactive sender with no permissions
    pub fn player(name: impl Into<String>) -> Self {
        Self {
            kind: SenderKind::Interactive,
            ..Self::new(name)
        }
    }

    /// Grant a permission node
    pub fn with_permission(self, permission: impl Into<String>) -> Self {
        self.permissions.write().insert(permission.into());
        self
    }

    /// Grant every permission node
    pub fn with_all_permissions(mut self) -> Self {
        self.all_permissions = true;
        self
    }

    /// Grant a permission node after construction
    pub fn grant(&self, permission: impl Into<String>) {
        self.permissions.write().insert(permission.into());
    }

    /// Revoke a permission node
    pub fn revoke(&self, permission: &str) -> bool {
        self.permissions.write().remove(permission)
    }

    /// All messages received so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Drain the received messages
    pub fn take_messages(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }

    /// Number of messages received so far
    pub fn message_count(&self) -> usize {
        self.messages.lock().len()
    }

    /// The most recent message
    pub fn last_message(&self) -> Option<String> {
        self.messages.lock().last().cloned()
    }
}

impl CommandSender for MemorySender {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> String {
        self.unique_id.to_string()
    }

    fn send_message(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.all_permissions || self.permissions.read().contains(permission)
    }

    fn as_interactive(&self) -> Option<&dyn PlayerSender> {
        match self.kind {
            SenderKind::Interactive => Some(self as &dyn PlayerSender),
            SenderKind::Generic => None,
        }
    }

    fn kind(&self) -> SenderKind {
        self.kind
    }
}

impl PlayerSender for MemorySender {
    fn unique_id(&self) -> Uuid {
        self.unique_id
    }
}

//! Permission and sender-kind gate
//!
//! Both checks are pure: they never message the sender or log. The
//! dispatcher turns a rejection into the configured sender-visible text.

use thiserror::Error;

use super::types::{CommandDescriptor, SenderRequirement};
use crate::sender::{CommandSender, SenderKind};

/// Outcome of the permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }
}

/// The sender lacks the capability a binding requires
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Command requires a {required:?} sender, got a {actual} sender")]
pub struct SenderKindRejected {
    pub required: SenderRequirement,
    pub actual: SenderKind,
}

/// Stateless permission gate
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGuard;

impl PermissionGuard {
    /// Allowed iff the descriptor is public or the sender holds its permission
    pub fn check(sender: &dyn CommandSender, descriptor: &CommandDescriptor) -> Access {
        Self::check_node(sender, &descriptor.permission)
    }

    /// Allowed iff `permission` is empty or the sender holds it
    pub fn check_node(sender: &dyn CommandSender, permission: &str) -> Access {
        if permission.is_empty() || sender.has_permission(permission) {
            Access::Allowed
        } else {
            Access::Denied
        }
    }

    /// Whether the sender satisfies the binding's sender requirement
    pub fn check_sender(
        sender: &dyn CommandSender,
        requirement: SenderRequirement,
    ) -> Result<(), SenderKindRejected> {
        match requirement {
            SenderRequirement::InteractiveOnly if sender.as_interactive().is_none() => {
                Err(SenderKindRejected {
                    required: requirement,
                    actual: sender.kind(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sender::MemorySender;

    #[test]
    fn test_public_command_is_allowed() {
        let sender = MemorySender::new("alex");
        let descriptor = CommandDescriptor::new("spawn");
        assert_eq!(PermissionGuard::check(&sender, &descriptor), Access::Allowed);
    }

    #[test]
    fn test_permission_required() {
        let descriptor = CommandDescriptor::new("shop sell").with_permission("shop.sell");

        let sender = MemorySender::new("alex");
        assert_eq!(PermissionGuard::check(&sender, &descriptor), Access::Denied);

        sender.grant("shop.sell");
        assert!(PermissionGuard::check(&sender, &descriptor).is_allowed());
    }

    #[test]
    fn test_sender_kind() {
        let console = MemorySender::new("console");
        let player = MemorySender::player("Steve");

        for requirement in [SenderRequirement::AnySender, SenderRequirement::ContextWrapped] {
            assert!(PermissionGuard::check_sender(&console, requirement).is_ok());
            assert!(PermissionGuard::check_sender(&player, requirement).is_ok());
        }

        assert!(PermissionGuard::check_sender(&player, SenderRequirement::InteractiveOnly).is_ok());
        let rejected =
            PermissionGuard::check_sender(&console, SenderRequirement::InteractiveOnly).unwrap_err();
        assert_eq!(rejected.actual, SenderKind::Generic);
        assert!(rejected.to_string().contains("generic"));
    }
}

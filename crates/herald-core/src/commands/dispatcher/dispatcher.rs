//! Dispatcher implementation

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

use super::pool::WorkerPool;
use crate::commands::permission::{Access, PermissionGuard};
use crate::commands::registry::CommandEntry;
use crate::config::{EngineConfig, MessagesConfig};
use crate::error::{HeraldError, HeraldResult};
use crate::sender::{CommandSender, SharedSender};

/// Terminal state of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Nothing matched; the fallback listing was sent
    NoMatch,
    /// The sender lacks the command's permission
    Denied,
    /// The command needs an interactive sender
    WrongSenderKind,
    /// A synchronous handler returned `Ok`
    Completed,
    /// A synchronous handler returned `Err` or panicked
    Failed,
    /// Queued on the worker pool
    Submitted,
    /// The engine is shutting down
    Rejected,
}

impl DispatchOutcome {
    /// Whether the handler was (or will be) run
    pub fn is_dispatched(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Submitted)
    }
}

/// Gates and runs resolved commands
///
/// Every terminal outcome sends at most one message to the sender; handler
/// failures never propagate to the caller.
pub struct Dispatcher {
    pool: WorkerPool,
    messages: Arc<MessagesConfig>,
    accepting: AtomicBool,
}

impl Dispatcher {
    /// Create a dispatcher and start its worker pool
    pub fn new(config: &EngineConfig) -> HeraldResult<Self> {
        let pool = WorkerPool::new(config.worker_threads).map_err(HeraldError::PoolStart)?;
        Ok(Self::with_pool(pool, config.messages.clone()))
    }

    /// Create a dispatcher around an existing pool
    pub fn with_pool(pool: WorkerPool, messages: MessagesConfig) -> Self {
        Self {
            pool,
            messages: Arc::new(messages),
            accepting: AtomicBool::new(true),
        }
    }

    /// Run `entry` for `sender` with the arguments left after its path
    pub fn invoke(
        &self,
        entry: Arc<CommandEntry>,
        sender: SharedSender,
        label: &str,
        args: Vec<String>,
    ) -> DispatchOutcome {
        if !self.is_accepting() {
            sender.send_message(&self.messages.shutting_down);
            return DispatchOutcome::Rejected;
        }

        if PermissionGuard::check(sender.as_ref(), &entry.descriptor) == Access::Denied {
            debug!(
                path = %entry.path,
                sender = sender.name(),
                permission = %entry.descriptor.permission,
                "permission denied"
            );
            sender.send_message(&self.messages.permission_denied);
            return DispatchOutcome::Denied;
        }

        if let Err(rejected) = PermissionGuard::check_sender(sender.as_ref(), entry.binding.requirement())
        {
            debug!(path = %entry.path, sender = sender.name(), "{rejected}");
            sender.send_message(&self.messages.wrong_sender);
            return DispatchOutcome::WrongSenderKind;
        }

        if !entry.descriptor.is_async {
            return if run_guarded(&entry, sender.as_ref(), label, &args, &self.messages) {
                DispatchOutcome::Completed
            } else {
                DispatchOutcome::Failed
            };
        }

        let path = entry.path.clone();
        let messages = Arc::clone(&self.messages);
        let task_sender = Arc::clone(&sender);
        let label = label.to_string();
        let submitted = self.pool.submit(move || {
            run_guarded(&entry, task_sender.as_ref(), &label, &args, &messages);
        });

        match submitted {
            Ok(()) => {
                debug!(%path, sender = sender.name(), "submitted async command");
                DispatchOutcome::Submitted
            }
            Err(err) => {
                warn!(%path, "{err}");
                sender.send_message(&self.messages.shutting_down);
                DispatchOutcome::Rejected
            }
        }
    }

    /// Stop accepting invocations and shut the worker pool down
    pub fn shutdown(&self) {
        if self.accepting.swap(false, Ordering::AcqRel) {
            info!("dispatcher stopped accepting commands");
        }
        self.pool.shutdown();
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting.load(Ordering::Acquire)
    }

    /// Async commands submitted and not yet finished
    pub fn in_flight(&self) -> usize {
        self.pool.in_flight()
    }

    pub fn messages(&self) -> &MessagesConfig {
        &self.messages
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("pool", &self.pool)
            .field("accepting", &self.is_accepting())
            .finish_non_exhaustive()
    }
}

/// Run the handler, containing errors and panics; returns whether it succeeded
fn run_guarded(
    entry: &CommandEntry,
    sender: &dyn CommandSender,
    label: &str,
    args: &[String],
    messages: &MessagesConfig,
) -> bool {
    let result = panic::catch_unwind(AssertUnwindSafe(|| entry.binding.call(sender, label, args)));

    let failure = match result {
        Ok(Ok(())) => return true,
        Ok(Err(err)) => format!("{err:#}"),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };

    error!(
        path = %entry.path,
        sender = sender.name(),
        binding = entry.binding.kind(),
        error = %failure,
        "command handler failed"
    );
    sender.send_message(&messages.handler_error);
    false
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

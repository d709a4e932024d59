//! Command engine
//!
//! The single entry point a host talks to. It owns the registry, the
//! dispatcher and the completion provider, and runs the per-invocation
//! state machine: resolve, fall back to a listing when nothing matches,
//! then gate and dispatch.

use std::sync::Arc;
use tracing::{debug, info};

use super::completion::{CompletionCache, CompletionProvider};
use super::dispatcher::{DispatchOutcome, Dispatcher};
use super::permission::PermissionGuard;
use super::registry::{CommandHost, ManifestHost, Registry};
use super::resolver::Resolution;
use super::types::{CommandDescriptor, HandlerBinding};
use crate::config::EngineConfig;
use crate::error::{HeraldResult, RegistrationError};
use crate::sender::{CommandSender, SharedSender};

/// Command registration and resolution engine
///
/// `Send + Sync`; share it behind an `Arc`.
pub struct CommandEngine {
    registry: Arc<Registry>,
    dispatcher: Dispatcher,
    completion: CompletionProvider,
    config: EngineConfig,
}

impl CommandEngine {
    /// Create an engine claiming roots from `host`
    pub fn new(host: Arc<dyn CommandHost>, config: EngineConfig) -> HeraldResult<Self> {
        config.validate()?;

        let registry = Arc::new(Registry::new(host));
        let dispatcher = Dispatcher::new(&config)?;
        let completion =
            CompletionProvider::new(Arc::clone(&registry), config.completion_cache.clone());

        info!(
            worker_threads = config.worker_threads,
            declared_roots = config.declared_roots.len(),
            "command engine started"
        );
        Ok(Self {
            registry,
            dispatcher,
            completion,
            config,
        })
    }

    /// Create an engine with the default configuration
    pub fn with_defaults(host: Arc<dyn CommandHost>) -> HeraldResult<Self> {
        Self::new(host, EngineConfig::default())
    }

    /// Create an engine whose host declares `config.declared_roots`
    pub fn with_manifest(config: EngineConfig) -> HeraldResult<Self> {
        let host = Arc::new(ManifestHost::new(&config.declared_roots));
        Self::new(host, config)
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Register a command (see [`Registry::register`])
    pub fn register(
        &self,
        descriptor: CommandDescriptor,
        binding: HandlerBinding,
    ) -> Result<(), RegistrationError> {
        self.registry.register(descriptor, binding)
    }

    /// Resolve without dispatching
    pub fn resolve(&self, root: &str, args: &[String]) -> Resolution {
        self.registry.resolve(root, args)
    }

    /// Run one invocation through resolve, gate and dispatch
    pub fn handle(&self, sender: SharedSender, root: &str, args: &[String]) -> DispatchOutcome {
        if !self.dispatcher.is_accepting() {
            sender.send_message(&self.config.messages.shutting_down);
            return DispatchOutcome::Rejected;
        }

        match self.registry.resolve(root, args) {
            Resolution::Matched {
                entry,
                remaining_args,
            } => self.dispatcher.invoke(entry, sender, root, remaining_args),
            Resolution::NoMatch => {
                debug!(root, sender = sender.name(), "no command matched");
                self.send_listing(sender.as_ref(), root);
                DispatchOutcome::NoMatch
            }
        }
    }

    /// Host executor callback
    ///
    /// Returns `false` only for roots this engine does not route (never
    /// registered, or undeclared by the host); the host then treats the
    /// command as unknown.
    pub fn execute(&self, sender: SharedSender, label: &str, args: &[String]) -> bool {
        let root = label.trim();
        if !self.registry.is_routable(root) {
            debug!(root, "root is not routed by this engine");
            return false;
        }
        self.handle(sender, root, args);
        true
    }

    /// Host completer callback
    pub fn complete(&self, sender: &dyn CommandSender, label: &str, args: &[String]) -> Vec<String> {
        self.completion.complete(sender, label, args)
    }

    /// Usage lines for every command under `root` the sender may use
    pub fn help_listing(&self, sender: &dyn CommandSender, root: &str) -> Vec<String> {
        self.registry
            .entries_under(&root.trim().to_lowercase())
            .iter()
            .filter(|entry| PermissionGuard::check(sender, &entry.descriptor).is_allowed())
            .map(|entry| {
                let descriptor = &entry.descriptor;
                if descriptor.description.is_empty() {
                    descriptor.display_usage()
                } else {
                    format!("{} - {}", descriptor.display_usage(), descriptor.description)
                }
            })
            .collect()
    }

    fn send_listing(&self, sender: &dyn CommandSender, root: &str) {
        let messages = &self.config.messages;
        let lines = self.help_listing(sender, root);
        if lines.is_empty() {
            sender.send_message(&messages.no_commands);
        } else {
            sender.send_message(&format!("{}\n{}", messages.listing_header, lines.join("\n")));
        }
    }

    /// Stop accepting invocations and shut the worker pool down
    pub fn shutdown(&self) {
        self.dispatcher.shutdown();
        info!(commands = self.registry.len(), "command engine shut down");
    }

    pub fn is_running(&self) -> bool {
        self.dispatcher.is_accepting()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Async commands submitted and not yet finished
    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    pub fn completion_cache(&self) -> &CompletionCache {
        self.completion.cache()
    }
}

impl std::fmt::Debug for CommandEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandEngine")
            .field("registry", &self.registry)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;

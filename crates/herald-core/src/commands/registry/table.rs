//! Declarative bulk registration
//!
//! Two ways to declare many commands compactly:
//!
//! - [`CommandSet`]: a type lists its handler methods with a [`CommandSpec`]
//!   each; [`Registry::register_all`] binds them to one shared instance.
//! - [`CommandTable`]: a builder of `(descriptor, callback)` rows fed to the
//!   registry in a loop.

use std::sync::Arc;

use super::types::{OwnerId, Registry};
use crate::commands::types::{
    BoundMethod, CommandDescriptor, CommandPath, HandlerBinding, HandlerResult, MethodSignature,
    SenderArg,
};
use crate::error::RegistrationError;
use crate::sender::{CommandSender, PlayerSender};

/// Registration marker for one method of a [`CommandSet`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command name, appended to `parent`
    pub name: String,
    /// Parent path for sub-commands (empty for a root command)
    pub parent: String,
    pub permission: String,
    pub description: String,
    pub usage: String,
    pub is_async: bool,
}

impl CommandSpec {
    /// A root-level command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A sub-command under `parent`
    pub fn sub(parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            ..Self::default()
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Build the descriptor, joining `parent` and `name` into the path
    pub fn descriptor(&self) -> Result<CommandDescriptor, RegistrationError> {
        let path = CommandPath::from_parts(&self.parent, &self.name)?;
        Ok(CommandDescriptor::new(path.to_string())
            .with_permission(self.permission.clone())
            .with_description(self.description.clone())
            .with_usage(self.usage.clone())
            .with_async(self.is_async))
    }
}

/// One handler method of a [`CommandSet`]
pub struct CommandMethod<T> {
    pub spec: CommandSpec,
    pub signature: MethodSignature,
    pub method: fn(&T, SenderArg<'_>, &[String]) -> HandlerResult,
}

impl<T> CommandMethod<T> {
    pub fn new(
        spec: CommandSpec,
        signature: MethodSignature,
        method: fn(&T, SenderArg<'_>, &[String]) -> HandlerResult,
    ) -> Self {
        Self {
            spec,
            signature,
            method,
        }
    }
}

/// A type whose methods are command handlers
pub trait CommandSet: Send + Sync + Sized + 'static {
    /// The handler methods to register
    fn commands() -> Vec<CommandMethod<Self>>;
}

impl Registry {
    /// Register every method of `T` bound to `target`, under `owner`
    ///
    /// Stops at the first failure; commands registered before it stay
    /// registered (use [`Registry::unregister_owner`] to roll back).
    pub fn register_all<T: CommandSet>(
        &self,
        owner: impl Into<OwnerId>,
        target: Arc<T>,
    ) -> Result<usize, RegistrationError> {
        let owner = owner.into();
        let mut count = 0;
        for command in T::commands() {
            let descriptor = command.spec.descriptor()?;
            let binding = HandlerBinding::method(BoundMethod::new(
                Arc::clone(&target),
                command.signature,
                command.method,
            ));
            self.insert(Some(owner.clone()), descriptor, binding)?;
            count += 1;
        }
        Ok(count)
    }
}

/// Builder for a table of callback commands
///
/// Descriptor setters apply to the most recently added row.
#[derive(Debug, Default)]
pub struct CommandTable {
    rows: Vec<(CommandDescriptor, HandlerBinding)>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback command at `path`
    pub fn command<F>(self, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&dyn CommandSender, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        self.binding(path, HandlerBinding::callback(handler))
    }

    /// Add a player-only callback command at `path`
    pub fn player_command<F>(self, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&dyn PlayerSender, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        self.binding(path, HandlerBinding::player(handler))
    }

    /// Add a sub-command `parent + " " + name`
    pub fn sub<F>(self, parent: &str, name: &str, handler: F) -> Self
    where
        F: Fn(&dyn CommandSender, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        self.command(format!("{parent} {name}"), handler)
    }

    /// Add a row with an explicit binding
    pub fn binding(mut self, path: impl Into<String>, binding: HandlerBinding) -> Self {
        self.rows.push((CommandDescriptor::new(path), binding));
        self
    }

    pub fn permission(self, permission: impl Into<String>) -> Self {
        let permission = permission.into();
        self.update_last(|d| d.permission = permission)
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.update_last(|d| d.description = description)
    }

    pub fn usage(self, usage: impl Into<String>) -> Self {
        let usage = usage.into();
        self.update_last(|d| d.usage = usage)
    }

    pub fn asynchronous(self) -> Self {
        self.update_last(|d| d.is_async = true)
    }

    fn update_last(mut self, update: impl FnOnce(&mut CommandDescriptor)) -> Self {
        if let Some((descriptor, _)) = self.rows.last_mut() {
            update(descriptor);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Register every row; stops at the first failure
    pub fn register_into(self, registry: &Registry) -> Result<usize, RegistrationError> {
        self.register_rows(registry, None)
    }

    /// Register every row under `owner`; stops at the first failure
    pub fn register_owned_into(
        self,
        registry: &Registry,
        owner: impl Into<OwnerId>,
    ) -> Result<usize, RegistrationError> {
        self.register_rows(registry, Some(owner.into()))
    }

    fn register_rows(
        self,
        registry: &Registry,
        owner: Option<OwnerId>,
    ) -> Result<usize, RegistrationError> {
        let mut count = 0;
        for (descriptor, binding) in self.rows {
            registry.insert(owner.clone(), descriptor, binding)?;
            count += 1;
        }
        Ok(count)
    }
}

//! Handler bindings
//!
//! A binding is the executable behind a descriptor. It is either a plain
//! callback or a method bound to an owned target instance. Methods declare
//! their parameter kinds up front in a [`MethodSignature`], which the
//! registry validates once at registration; the first parameter's kind is
//! the sender requirement the dispatcher enforces.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;

use super::context::CommandContext;
use crate::sender::{CommandSender, PlayerSender};

/// What a handler returns; `Err` is reported as a handler exception
pub type HandlerResult = anyhow::Result<()>;

/// Callback shape: `(sender, args)`
pub type CallbackFn = dyn Fn(&dyn CommandSender, &[String]) -> HandlerResult + Send + Sync;

/// Type-erased bound method: `(narrowed sender, args)`
pub type MethodInvoker = dyn Fn(SenderArg<'_>, &[String]) -> HandlerResult + Send + Sync;

/// Capability a binding requires from the sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SenderRequirement {
    /// Any sender
    AnySender,
    /// Only senders with the interactive capability set
    InteractiveOnly,
    /// Any sender, wrapped in a [`CommandContext`]
    ContextWrapped,
}

/// Declared kind of one method parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    AnySender,
    InteractiveSender,
    Context,
    StringArray,
    /// Anything else, named for error messages
    Other(&'static str),
}

impl ParamKind {
    /// The sender requirement this kind stands for, if it is a sender kind
    pub fn sender_requirement(self) -> Option<SenderRequirement> {
        match self {
            Self::AnySender => Some(SenderRequirement::AnySender),
            Self::InteractiveSender => Some(SenderRequirement::InteractiveOnly),
            Self::Context => Some(SenderRequirement::ContextWrapped),
            Self::StringArray | Self::Other(_) => None,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnySender => write!(f, "sender"),
            Self::InteractiveSender => write!(f, "player"),
            Self::Context => write!(f, "context"),
            Self::StringArray => write!(f, "args"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Declared parameter list of a bound method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Method name, for logs and error messages
    pub name: String,
    /// Parameter kinds in declaration order
    pub params: Vec<ParamKind>,
}

impl MethodSignature {
    /// Create a signature from explicit parameter kinds
    pub fn new(name: impl Into<String>, params: Vec<ParamKind>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// `(sender, args)`
    pub fn sender(name: impl Into<String>) -> Self {
        Self::new(name, vec![ParamKind::AnySender, ParamKind::StringArray])
    }

    /// `(player, args)`
    pub fn interactive(name: impl Into<String>) -> Self {
        Self::new(name, vec![ParamKind::InteractiveSender, ParamKind::StringArray])
    }

    /// `(context, args)`
    pub fn context(name: impl Into<String>) -> Self {
        Self::new(name, vec![ParamKind::Context, ParamKind::StringArray])
    }

    /// Check the `(sender-kind, args)` shape and return the sender requirement
    pub fn validate(&self) -> Result<SenderRequirement, String> {
        if self.params.len() != 2 {
            return Err(format!(
                "method '{}' must take exactly 2 parameters, found {}",
                self.name,
                self.params.len()
            ));
        }
        let requirement = self.params[0].sender_requirement().ok_or_else(|| {
            format!(
                "method '{}': first parameter must be a sender, player or context, found {}",
                self.name, self.params[0]
            )
        })?;
        if self.params[1] != ParamKind::StringArray {
            return Err(format!(
                "method '{}': second parameter must be args, found {}",
                self.name, self.params[1]
            ));
        }
        Ok(requirement)
    }

    /// Sender requirement implied by the first parameter
    pub fn requirement(&self) -> SenderRequirement {
        self.params
            .first()
            .and_then(|kind| kind.sender_requirement())
            .unwrap_or(SenderRequirement::AnySender)
    }
}

/// The sender as seen by a bound method, narrowed per its first parameter
#[derive(Clone, Copy)]
pub enum SenderArg<'a> {
    Any(&'a dyn CommandSender),
    Interactive(&'a dyn PlayerSender),
    Context(&'a CommandContext<'a>),
}

impl<'a> SenderArg<'a> {
    /// The underlying sender regardless of narrowing
    pub fn sender(&self) -> &'a dyn CommandSender {
        match *self {
            Self::Any(sender) => sender,
            Self::Interactive(player) => player,
            Self::Context(context) => context.sender(),
        }
    }

    /// Send a message to the underlying sender
    pub fn reply(&self, message: impl AsRef<str>) {
        self.sender().send_message(message.as_ref());
    }
}

/// A method bound to an owned target instance
pub struct BoundMethod {
    target: Arc<dyn Any + Send + Sync>,
    target_type: &'static str,
    signature: MethodSignature,
    invoke: Arc<MethodInvoker>,
}

impl BoundMethod {
    /// Bind `method` to `target`
    pub fn new<T, F>(target: Arc<T>, signature: MethodSignature, method: F) -> Self
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&T, SenderArg<'a>, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        let bound = Arc::clone(&target);
        let invoke = erase(move |sender, args| method(bound.as_ref(), sender, args));
        Self {
            target,
            target_type: std::any::type_name::<T>(),
            signature,
            invoke,
        }
    }

    /// Declared signature
    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// Borrow the target instance as its concrete type
    pub fn target<T: 'static>(&self) -> Option<&T> {
        self.target.downcast_ref::<T>()
    }

    /// Type name of the target instance
    pub fn target_type(&self) -> &'static str {
        self.target_type
    }
}

fn erase<F>(invoke: F) -> Arc<MethodInvoker>
where
    F: for<'a> Fn(SenderArg<'a>, &[String]) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(invoke)
}

impl fmt::Debug for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("target_type", &self.target_type)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// The executable behind a registered command
pub enum HandlerBinding {
    /// A closure taking `(sender, args)`
    Callback {
        requirement: SenderRequirement,
        func: Arc<CallbackFn>,
    },
    /// A method bound to a target instance
    Method(BoundMethod),
}

impl HandlerBinding {
    /// Plain callback usable by any sender
    pub fn callback<F>(handler: F) -> Self
    where
        F: Fn(&dyn CommandSender, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        Self::with_requirement(SenderRequirement::AnySender, handler)
    }

    /// Player-only convenience adapter around a callback
    pub fn player<F>(handler: F) -> Self
    where
        F: Fn(&dyn PlayerSender, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        Self::with_requirement(SenderRequirement::InteractiveOnly, move |sender, args| {
            match sender.as_interactive() {
                Some(player) => handler(player, args),
                None => Err(anyhow!("'{}' is not an interactive sender", sender.name())),
            }
        })
    }

    fn with_requirement<F>(requirement: SenderRequirement, handler: F) -> Self
    where
        F: Fn(&dyn CommandSender, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        Self::Callback {
            requirement,
            func: Arc::new(handler),
        }
    }

    /// Bound method binding
    pub fn method(method: BoundMethod) -> Self {
        Self::Method(method)
    }

    /// Sender capability the handler needs
    pub fn requirement(&self) -> SenderRequirement {
        match self {
            Self::Callback { requirement, .. } => *requirement,
            Self::Method(method) => method.signature.requirement(),
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Callback { .. } => "callback",
            Self::Method(_) => "method",
        }
    }

    /// Run the handler with an already-checked sender
    pub fn call(&self, sender: &dyn CommandSender, label: &str, args: &[String]) -> HandlerResult {
        match self {
            Self::Callback { func, .. } => func(sender, args),
            Self::Method(method) => match method.signature.requirement() {
                SenderRequirement::AnySender => (method.invoke)(SenderArg::Any(sender), args),
                SenderRequirement::InteractiveOnly => match sender.as_interactive() {
                    Some(player) => (method.invoke)(SenderArg::Interactive(player), args),
                    None => Err(anyhow!("'{}' is not an interactive sender", sender.name())),
                },
                SenderRequirement::ContextWrapped => {
                    let context = CommandContext::new(sender, label, args);
                    (method.invoke)(SenderArg::Context(&context), args)
                }
            },
        }
    }
}

impl fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback { requirement, .. } => f
                .debug_struct("Callback")
                .field("requirement", requirement)
                .finish_non_exhaustive(),
            Self::Method(method) => f.debug_tuple("Method").field(method).finish(),
        }
    }
}

//! Command type definitions
//!
//! Paths, descriptors, handler bindings and the context handed to
//! context-wrapped handlers.

mod binding;
mod context;
mod descriptor;
mod path;

pub use binding::{
    BoundMethod, CallbackFn, HandlerBinding, HandlerResult, MethodInvoker, MethodSignature,
    ParamKind, SenderArg, SenderRequirement,
};
pub use context::CommandContext;
pub use descriptor::CommandDescriptor;
pub use path::CommandPath;
pub(crate) use path::normalize_key;

#[cfg(test)]
mod tests;

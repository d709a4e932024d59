//! Command registration and resolution
//!
//! This module turns declaratively registered commands into a routing table,
//! resolves raw invocations against it, gates them on permission and sender
//! kind, and runs the handler inline or on a worker pool. Tab completion is
//! answered from the same table.
//!
//! # Overview
//!
//! A command lives at a space-separated path whose first token is its
//! *root* (`shop`, `guild invite`, `guild rank set`). Paths are
//! case-insensitive and stored in one flat namespace; an invocation
//! `root + args` resolves to the longest registered prefix, and the tokens
//! after it are handed to the handler with their original casing.
//!
//! # Handlers
//!
//! - **Callbacks**: closures taking `(sender, args)`
//! - **Player callbacks**: closures that only run for interactive senders
//! - **Bound methods**: methods of a [`CommandSet`] type, with a declared
//!   [`MethodSignature`] validated at registration
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use herald_core::commands::{CommandEngine, CommandTable, OpenHost};
//! use herald_core::sender::MemorySender;
//! use std::sync::Arc;
//!
//! let engine = CommandEngine::with_defaults(Arc::new(OpenHost))?;
//! CommandTable::new()
//!     .sub("shop", "buy", |sender, args| {
//!         sender.send_message(&format!("bought {}", args.join(" ")));
//!         Ok(())
//!     })
//!     .permission("shop.buy")
//!     .register_into(engine.registry())?;
//!
//! let sender = Arc::new(MemorySender::new("alex").with_permission("shop.buy"));
//! engine.execute(sender, "shop", &["buy".into(), "Diamond".into()]);
//! ```
//!
//! # Failure Model
//!
//! Registration errors are returned to the registering code. Everything
//! after resolution degrades to at most one message to the sender: an
//! unknown sub-path gets the command listing, a missing permission or the
//! wrong sender kind gets a fixed refusal, and a failing or panicking
//! handler gets a generic error while the details go to the log.

pub mod completion;
pub mod dispatcher;
pub mod engine;
pub mod permission;
pub mod registry;
pub mod resolver;
pub mod types;

pub use completion::{CompletionCache, CompletionCacheStats, CompletionProvider};
pub use dispatcher::{DispatchOutcome, Dispatcher, WorkerPool};
pub use engine::CommandEngine;
pub use permission::{Access, PermissionGuard, SenderKindRejected};
pub use registry::{
    CommandEntry, CommandHost, CommandMethod, CommandSet, CommandSpec, CommandTable, Completer,
    ManifestHost, OpenHost, OwnerId, Registry, RootClaim, RootState,
};
pub use resolver::Resolution;
pub use types::{
    BoundMethod, CommandContext, CommandDescriptor, CommandPath, HandlerBinding, HandlerResult,
    MethodSignature, ParamKind, SenderArg, SenderRequirement,
};

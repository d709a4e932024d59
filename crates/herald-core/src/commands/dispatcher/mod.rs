//! Command dispatch
//!
//! Runs the permission and sender-kind gates, then executes the handler
//! inline (synchronous commands) or on the [`WorkerPool`] (asynchronous
//! commands). Errors and panics escaping a handler stop at this boundary.

#[allow(clippy::module_inception)]
mod dispatcher;
mod pool;


pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use pool::{WORKER_THREAD_NAME, WorkerPool};
